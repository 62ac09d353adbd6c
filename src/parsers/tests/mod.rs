mod card_tests;
mod result_extractor_tests;
mod reverse_extractor_tests;
