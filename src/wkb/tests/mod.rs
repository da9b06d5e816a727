mod malformed_tests;
