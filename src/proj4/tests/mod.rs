mod decoder_tests;
