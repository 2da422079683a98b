mod file_test;
mod mock_test;
