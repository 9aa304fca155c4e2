// src/macros.rs

/// String shorthand.
/// `s!()` is an empty `String`, `s!(x)` is `String::from(x)`.
#[macro_export]
macro_rules! s {
    () => {
        ::std::string::String::new()
    };
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

/// Concatenate string-ish pieces into one owned `String`.
#[macro_export]
macro_rules! join {
    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let mut s = ::std::string::String::from($first);
        $(
            s.push_str($rest);
        )+
        s
    }};
}

/// `Vec<String>` from string literals / `&str`s.
#[macro_export]
macro_rules! svec {
    () => {
        ::std::vec::Vec::<::std::string::String>::new()
    };
    ($($item:expr),+ $(,)?) => {
        vec![$(::std::string::String::from($item)),+]
    };
}
