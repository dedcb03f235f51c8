use std::path::PathBuf;
use std::str::FromStr;

use crate::constant::LIST_SEPARATOR;
use crate::prelude::Codec;

macro_rules! impl_codec {
    ($($type:ty),* $(,)?) => {
        $(
            impl Codec for $type {
                fn type_name() -> String {
                    stringify!($type).to_string()
                }

                fn decode(text: &str) -> Option<Self> {
                    <$type as FromStr>::from_str(text).ok()
                }

                fn encode(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_codec!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, bool, String);

impl Codec for PathBuf {
    fn type_name() -> String {
        "path".to_string()
    }

    fn decode(text: &str) -> Option<Self> {
        if text.is_empty() {
            None
        } else {
            Some(PathBuf::from(text))
        }
    }

    fn encode(&self) -> String {
        self.display().to_string()
    }
}

/// A list is one token: its items are separated by spaces.
impl<T: Codec> Codec for Vec<T> {
    fn type_name() -> String {
        format!("Vec<{}>", T::type_name())
    }

    fn decode(text: &str) -> Option<Self> {
        text.split(LIST_SEPARATOR)
            .filter(|item| !item.is_empty())
            .map(T::decode)
            .collect()
    }

    fn encode(&self) -> String {
        self.iter()
            .map(Codec::encode)
            .collect::<Vec<String>>()
            .join(&LIST_SEPARATOR.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{thread_rng, Rng};
    use rstest::rstest;

    #[rstest]
    #[case("0", Some(0))]
    #[case("-12", Some(-12))]
    #[case("+7", Some(7))]
    #[case("1.0", None)]
    #[case("", None)]
    #[case("abc", None)]
    fn decode_i32(#[case] text: &str, #[case] expected: Option<i32>) {
        assert_eq!(i32::decode(text), expected);
    }

    #[rstest]
    #[case("true", Some(true))]
    #[case("false", Some(false))]
    #[case("", None)]
    #[case("1", None)]
    #[case("True", None)]
    fn decode_bool(#[case] text: &str, #[case] expected: Option<bool>) {
        assert_eq!(bool::decode(text), expected);
    }

    #[rstest]
    #[case("", Some(vec![]))]
    #[case("1", Some(vec![1]))]
    #[case("1 2 3", Some(vec![1, 2, 3]))]
    #[case("  1   2 ", Some(vec![1, 2]))]
    #[case("1 x", None)]
    fn decode_list(#[case] text: &str, #[case] expected: Option<Vec<u8>>) {
        assert_eq!(Vec::<u8>::decode(text), expected);
    }

    #[test]
    fn decode_path() {
        assert_eq!(PathBuf::decode("a/b"), Some(PathBuf::from("a/b")));
        assert_eq!(PathBuf::decode(""), None);
    }

    #[test]
    fn type_names() {
        assert_eq!(i32::type_name(), "i32");
        assert_eq!(String::type_name(), "String");
        assert_eq!(PathBuf::type_name(), "path");
        assert_eq!(Vec::<u64>::type_name(), "Vec<u64>");
        assert_eq!(Vec::<Vec<bool>>::type_name(), "Vec<Vec<bool>>");
    }

    #[test]
    fn encode_list() {
        assert_eq!(vec![1, 2, 3].encode(), "1 2 3");
        assert_eq!(Vec::<i8>::default().encode(), "");
    }

    #[test]
    fn round_trip_integers() {
        let mut rng = thread_rng();

        for _ in 0..100 {
            let value: i64 = rng.gen();
            assert_eq!(i64::decode(&value.encode()), Some(value));

            let value: u8 = rng.gen();
            assert_eq!(u8::decode(&value.encode()), Some(value));

            let value: isize = rng.gen();
            assert_eq!(isize::decode(&value.encode()), Some(value));
        }
    }

    #[test]
    fn round_trip_floats() {
        let mut rng = thread_rng();

        for _ in 0..100 {
            let value: f64 = rng.gen_range(-1.0e12..1.0e12);
            assert_eq!(f64::decode(&value.encode()), Some(value));

            let value: f32 = rng.gen();
            assert_eq!(f32::decode(&value.encode()), Some(value));
        }
    }

    #[rstest]
    #[case("abc")]
    #[case("with space")]
    #[case("")]
    fn round_trip_string(#[case] text: &str) {
        let value = String::decode(text).unwrap();
        assert_eq!(String::decode(&value.encode()), Some(value));
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    fn round_trip_bool(#[case] value: bool) {
        assert_eq!(bool::decode(&value.encode()), Some(value));
    }

    #[rstest]
    #[case("a/b")]
    #[case("/etc/braid.conf")]
    #[case("with space/x")]
    #[case(".")]
    fn round_trip_path(#[case] text: &str) {
        let value = PathBuf::from(text);
        assert_eq!(PathBuf::decode(&value.encode()), Some(value));
    }

    #[rstest]
    #[case("NaN")]
    #[case("inf")]
    #[case("-inf")]
    fn decode_float_special(#[case] text: &str) {
        let value = f64::decode(text).unwrap();

        // NaN never equals itself, so compare the encoding.
        assert_eq!(f64::decode(&value.encode()).map(|v| v.encode()), Some(value.encode()));
        assert_eq!(value.is_nan(), text == "NaN");
    }

    #[test]
    fn round_trip_list() {
        let value = Vec::<i16>::decode(" 4 -5  6").unwrap();
        assert_eq!(Vec::<i16>::decode(&value.encode()), Some(value));
    }
}
