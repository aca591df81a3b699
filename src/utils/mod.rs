mod string;

pub use string::{decode_js_escape, strip_ansi, terse_message};
