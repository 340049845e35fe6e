mod morph_tests;
