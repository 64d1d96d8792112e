//! Deserializer adapter for the plain number mode.
//!
//! With `arbitrary_precision`, `serde_json` hands numbers to untyped
//! positions (`Value`, `Number`) as a one-entry map keyed by a private token
//! whose value is the literal text. [`Coerce`] wraps a deserializer and every
//! nested access, and rewrites that literal to what a decoder without
//! arbitrary precision would produce: 64-bit integers unchanged, any other
//! number as the nearest `f64`, and "number out of range" when there is no
//! finite one. Typed fields never take that path and are left alone.

use std::fmt;

use serde::de::{
    self, DeserializeSeed, Deserializer, EnumAccess, IntoDeserializer, MapAccess, SeqAccess,
    VariantAccess, Visitor,
};

const NUMBER_TOKEN: &str = "$serde_json::private::Number";

pub(crate) struct Coerce<'a, D> {
    inner: D,
    key: Option<&'a mut bool>,
}

impl<D> Coerce<'static, D> {
    pub(crate) fn new(inner: D) -> Self {
        Coerce { inner, key: None }
    }
}

fn coerce_literal<E: de::Error>(literal: String) -> Result<String, E> {
    if literal.parse::<u64>().is_ok() || literal.parse::<i64>().is_ok() {
        return Ok(literal);
    }

    literal
        .parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(|number| number.to_string())
        .ok_or_else(|| E::custom("number out of range"))
}

macro_rules! forward_deserialize {
    ($($method:ident($($arg:ident: $ty:ty),*);)*) => {$(
        fn $method<V>(self, $($arg: $ty,)* visitor: V) -> Result<V::Value, Self::Error>
        where
            V: Visitor<'de>,
        {
            self.inner.$method($($arg,)* Wrap { delegate: visitor, key: self.key })
        }
    )*};
}

impl<'de, D> Deserializer<'de> for Coerce<'_, D>
where
    D: Deserializer<'de>,
{
    type Error = D::Error;

    forward_deserialize! {
        deserialize_any();
        deserialize_bool();
        deserialize_i8();
        deserialize_i16();
        deserialize_i32();
        deserialize_i64();
        deserialize_i128();
        deserialize_u8();
        deserialize_u16();
        deserialize_u32();
        deserialize_u64();
        deserialize_u128();
        deserialize_f32();
        deserialize_f64();
        deserialize_char();
        deserialize_str();
        deserialize_string();
        deserialize_bytes();
        deserialize_byte_buf();
        deserialize_option();
        deserialize_unit();
        deserialize_unit_struct(name: &'static str);
        deserialize_newtype_struct(name: &'static str);
        deserialize_seq();
        deserialize_tuple(len: usize);
        deserialize_tuple_struct(name: &'static str, len: usize);
        deserialize_map();
        deserialize_struct(name: &'static str, fields: &'static [&'static str]);
        deserialize_enum(name: &'static str, variants: &'static [&'static str]);
        deserialize_identifier();
        deserialize_ignored_any();
    }

    fn is_human_readable(&self) -> bool {
        self.inner.is_human_readable()
    }
}

/// Visitor wrapper; `key` is set when the visited string is the number token.
struct Wrap<'a, V> {
    delegate: V,
    key: Option<&'a mut bool>,
}

macro_rules! forward_visit {
    ($($method:ident($ty:ty);)*) => {$(
        fn $method<E>(self, v: $ty) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            self.delegate.$method(v)
        }
    )*};
}

impl<'de, V> Visitor<'de> for Wrap<'_, V>
where
    V: Visitor<'de>,
{
    type Value = V::Value;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.delegate.expecting(formatter)
    }

    forward_visit! {
        visit_bool(bool);
        visit_i8(i8);
        visit_i16(i16);
        visit_i32(i32);
        visit_i64(i64);
        visit_i128(i128);
        visit_u8(u8);
        visit_u16(u16);
        visit_u32(u32);
        visit_u64(u64);
        visit_u128(u128);
        visit_f32(f32);
        visit_f64(f64);
        visit_char(char);
        visit_bytes(&[u8]);
        visit_borrowed_bytes(&'de [u8]);
        visit_byte_buf(Vec<u8>);
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        if let Some(key) = self.key {
            *key = v == NUMBER_TOKEN;
        }
        self.delegate.visit_str(v)
    }

    fn visit_borrowed_str<E>(self, v: &'de str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        if let Some(key) = self.key {
            *key = v == NUMBER_TOKEN;
        }
        self.delegate.visit_borrowed_str(v)
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        if let Some(key) = self.key {
            *key = v == NUMBER_TOKEN;
        }
        self.delegate.visit_string(v)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        self.delegate.visit_none()
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        self.delegate.visit_unit()
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        self.delegate.visit_some(Coerce::new(deserializer))
    }

    fn visit_newtype_struct<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        self.delegate.visit_newtype_struct(Coerce::new(deserializer))
    }

    fn visit_seq<A>(self, seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        self.delegate.visit_seq(CoerceSeq(seq))
    }

    fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        self.delegate.visit_map(CoerceMap {
            inner: map,
            number: false,
        })
    }

    fn visit_enum<A>(self, data: A) -> Result<Self::Value, A::Error>
    where
        A: EnumAccess<'de>,
    {
        self.delegate.visit_enum(CoerceEnum(data))
    }
}

struct CoerceSeed<S>(S);

impl<'de, S> DeserializeSeed<'de> for CoerceSeed<S>
where
    S: DeserializeSeed<'de>,
{
    type Value = S::Value;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        self.0.deserialize(Coerce::new(deserializer))
    }
}

/// Key seed that records whether the key was the number token.
struct KeySeed<'a, S> {
    seed: S,
    number: &'a mut bool,
}

impl<'de, S> DeserializeSeed<'de> for KeySeed<'_, S>
where
    S: DeserializeSeed<'de>,
{
    type Value = S::Value;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        self.seed.deserialize(Coerce {
            inner: deserializer,
            key: Some(self.number),
        })
    }
}

struct CoerceSeq<A>(A);

impl<'de, A> SeqAccess<'de> for CoerceSeq<A>
where
    A: SeqAccess<'de>,
{
    type Error = A::Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>, Self::Error>
    where
        T: DeserializeSeed<'de>,
    {
        self.0.next_element_seed(CoerceSeed(seed))
    }

    fn size_hint(&self) -> Option<usize> {
        self.0.size_hint()
    }
}

struct CoerceMap<A> {
    inner: A,
    number: bool,
}

impl<'de, A> MapAccess<'de> for CoerceMap<A>
where
    A: MapAccess<'de>,
{
    type Error = A::Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>, Self::Error>
    where
        K: DeserializeSeed<'de>,
    {
        self.number = false;
        self.inner.next_key_seed(KeySeed {
            seed,
            number: &mut self.number,
        })
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value, Self::Error>
    where
        V: DeserializeSeed<'de>,
    {
        if !self.number {
            return self.inner.next_value_seed(CoerceSeed(seed));
        }

        let literal: String = self.inner.next_value()?;
        let literal = coerce_literal::<Self::Error>(literal)?;
        seed.deserialize(IntoDeserializer::<Self::Error>::into_deserializer(literal))
    }

    fn size_hint(&self) -> Option<usize> {
        self.inner.size_hint()
    }
}

struct CoerceEnum<A>(A);

impl<'de, A> EnumAccess<'de> for CoerceEnum<A>
where
    A: EnumAccess<'de>,
{
    type Error = A::Error;
    type Variant = CoerceVariant<A::Variant>;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant), Self::Error>
    where
        V: DeserializeSeed<'de>,
    {
        self.0
            .variant_seed(CoerceSeed(seed))
            .map(|(value, variant)| (value, CoerceVariant(variant)))
    }
}

struct CoerceVariant<A>(A);

impl<'de, A> VariantAccess<'de> for CoerceVariant<A>
where
    A: VariantAccess<'de>,
{
    type Error = A::Error;

    fn unit_variant(self) -> Result<(), Self::Error> {
        self.0.unit_variant()
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value, Self::Error>
    where
        T: DeserializeSeed<'de>,
    {
        self.0.newtype_variant_seed(CoerceSeed(seed))
    }

    fn tuple_variant<V>(self, len: usize, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        self.0.tuple_variant(len, Wrap {
            delegate: visitor,
            key: None,
        })
    }

    fn struct_variant<V>(
        self,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        self.0.struct_variant(fields, Wrap {
            delegate: visitor,
            key: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::Value;

    use super::*;

    fn coerced(input: &str) -> Result<Value, serde_json::Error> {
        let mut de = serde_json::Deserializer::from_str(input);
        Value::deserialize(Coerce::new(&mut de))
    }

    #[test]
    fn integers_in_range_keep_their_text() {
        assert_eq!(coerced("18446744073709551615").unwrap().to_string(), "18446744073709551615");
        assert_eq!(coerced("-9223372036854775808").unwrap().to_string(), "-9223372036854775808");
    }

    #[test]
    fn other_numbers_become_nearest_float() {
        let value = coerced(r#"{"a":[1.10,1E2]}"#).unwrap();

        assert_eq!(value["a"][0].as_f64(), Some(1.1));
        assert_eq!(value["a"][0].to_string(), "1.1");
        assert!(value["a"][1].is_f64());
        assert_eq!(value["a"][1].as_f64(), Some(100.0));
    }

    #[test]
    fn numbers_without_a_finite_float_are_out_of_range() {
        let err = coerced(r#"{"a":-1e400}"#).unwrap_err();

        assert!(err.to_string().starts_with("number out of range at line 1"));
    }

    #[test]
    fn strings_equal_to_the_token_stay_strings() {
        let value = coerced(r#"{"k":"$serde_json::private::Number"}"#).unwrap();

        assert_eq!(value["k"], NUMBER_TOKEN);
    }

    #[test]
    fn enums_and_options_pass_through() {
        #[derive(Debug, PartialEq, Deserialize)]
        enum Shape {
            Circle { radius: Value },
            Empty,
        }

        let mut de = serde_json::Deserializer::from_str(r#"[{"Circle":{"radius":2.50}},"Empty",null]"#);
        let shapes: Vec<Option<Shape>> = Vec::deserialize(Coerce::new(&mut de)).unwrap();

        let Some(Shape::Circle { radius }) = &shapes[0] else {
            panic!("expected a circle, got {:?}", shapes[0]);
        };
        assert_eq!(radius.to_string(), "2.5");
        assert_eq!(shapes[1], Some(Shape::Empty));
        assert_eq!(shapes[2], None);
    }
}
