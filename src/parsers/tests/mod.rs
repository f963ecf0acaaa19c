mod html_link_tests;
mod text_parser_unit_tests;
