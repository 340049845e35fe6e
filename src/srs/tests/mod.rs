mod norm_cache_tests;
