mod banner_tests;
