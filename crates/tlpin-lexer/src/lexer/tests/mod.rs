mod test_strings;
mod util;
