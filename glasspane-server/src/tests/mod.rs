mod route_tests;
