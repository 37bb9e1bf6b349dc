//! Login email content

use chrono::{DateTime, Utc};

pub const OTP_EMAIL_SUBJECT: &str = "MultiYO Admin Panel - Login OTP";

/// HTML body of the login email
pub fn render_otp_email(code: &str, expires_in_minutes: i64, requested_at: DateTime<Utc>) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <style>
    body {{ font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; background-color: #f5f5f5; margin: 0; padding: 0; }}
    .container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}
    .card {{ background-color: white; border-radius: 8px; box-shadow: 0 2px 8px rgba(0,0,0,0.1); padding: 30px; }}
    .title {{ font-size: 24px; font-weight: bold; color: #0f172a; text-align: center; }}
    .otp-box {{ background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; font-size: 36px; font-weight: bold; letter-spacing: 8px; padding: 20px; border-radius: 8px; font-family: 'Courier New', monospace; text-align: center; margin: 30px 0; }}
    .warning {{ background-color: #fef3c7; border-left: 4px solid #f59e0b; padding: 12px; border-radius: 4px; font-size: 13px; color: #92400e; }}
    .footer {{ text-align: center; margin-top: 30px; font-size: 12px; color: #94a3b8; border-top: 1px solid #e2e8f0; padding-top: 20px; }}
  </style>
</head>
<body>
  <div class="container">
    <div class="card">
      <div class="title">MultiYO Admin Login</div>
      <p style="color: #475569; font-size: 14px; line-height: 1.6;">
        You requested a login to the MultiYO Admin Dashboard. Use the following one-time password to complete your sign-in:
      </p>
      <div class="otp-box">{code}</div>
      <div class="warning">
        <strong>Security notice:</strong> never share this code with anyone. It expires in {minutes} minutes.
      </div>
      <p style="color: #64748b; font-size: 13px; line-height: 1.6;">
        Request time: <strong>{requested_at}</strong>
      </p>
      <div class="footer">
        <p style="margin: 0;">This is an automated email. Please do not reply.</p>
      </div>
    </div>
  </div>
</body>
</html>"#,
        code = code,
        minutes = expires_in_minutes,
        requested_at = requested_at.format("%Y-%m-%d %H:%M:%S UTC"),
    )
}

/// Plain-text alternative for clients that do not render HTML
pub fn render_otp_text(code: &str, expires_in_minutes: i64) -> String {
    format!(
        "Your MultiYO admin login code is {}.\nIt expires in {} minutes. Never share this code with anyone.",
        code, expires_in_minutes
    )
}
