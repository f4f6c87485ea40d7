mod workout_test;
