mod pqueue_tests;
