// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand!

    // Zero-arg → String::new()
    () => {
        ::std::string::String::new()
    };
    // Format string with args → format!
    ($fmt:literal, $($arg:tt)+) => {
        ::std::format!($fmt, $($arg)+)
    };
    // Any single expression: literals, consts, vars, &str fields
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

#[macro_export]
macro_rules! join {
    // &str concatenation into a fresh String
    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let mut s = ::std::string::String::from($first);
        $(
            s.push_str($rest);
        )+
        s
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn shorthands() {
        assert_eq!(s!(), "");
        assert_eq!(s!("abc"), "abc");
        assert_eq!(s!("{}-{}", 36, 67), "36-67");
        assert_eq!(join!("a", "/", "b.xlsx"), "a/b.xlsx");
    }
}
