mod api_tests;
mod geocode_tests;
mod home_tests;
mod listing_form_tests;
mod photo_tests;
