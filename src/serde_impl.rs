//! Order-preserving serde support, enabled by the `serde` feature.

use core::fmt;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::marker::PhantomData;

use serde::de::Deserialize;
use serde::de::Deserializer;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser::Serialize;
use serde::ser::Serializer;

use crate::ordered_map::OrderedMap;

impl<K, V, S> Serialize for OrderedMap<K, V, S>
where
    K: Serialize,
    V: Serialize,
{
    /// Writes the entries as a map, front to back.
    fn serialize<T>(&self, serializer: T) -> Result<T::Ok, T::Error>
    where
        T: Serializer,
    {
        serializer.collect_map(self)
    }
}

struct OrderedMapVisitor<K, V, S>(PhantomData<fn() -> OrderedMap<K, V, S>>);

impl<'de, K, V, S> Visitor<'de> for OrderedMapVisitor<K, V, S>
where
    K: Deserialize<'de> + Hash + Eq,
    V: Deserialize<'de>,
    S: BuildHasher + Default,
{
    type Value = OrderedMap<K, V, S>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        // The size hint comes from the input and is not trusted.
        let capacity = access.size_hint().unwrap_or(0).min(4096);
        let mut map = OrderedMap::with_capacity_and_hasher(capacity, S::default());
        while let Some((key, value)) = access.next_entry()? {
            map.set(key, value);
        }
        Ok(map)
    }
}

impl<'de, K, V, S> Deserialize<'de> for OrderedMap<K, V, S>
where
    K: Deserialize<'de> + Hash + Eq,
    V: Deserialize<'de>,
    S: BuildHasher + Default,
{
    /// Reads a map, keeping entries in the order they appear in the input. A
    /// repeated key overwrites the earlier value without moving it.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::string::ToString;
    use alloc::vec::Vec;

    use crate::OrderedMap;

    #[test]
    fn test_serialize_in_sequence_order() {
        let mut map = OrderedMap::from([("foo", 97), ("bar", 3), ("baz", 249)]);
        assert_eq!(
            serde_json::to_string(&map).unwrap(),
            r#"{"foo":97,"bar":3,"baz":249}"#
        );

        map.sort_values(|a, b| a < b);
        assert_eq!(
            serde_json::to_string(&map).unwrap(),
            r#"{"bar":3,"foo":97,"baz":249}"#
        );
    }

    #[test]
    fn test_deserialize_preserves_input_order() {
        let map: OrderedMap<String, i32> =
            serde_json::from_str(r#"{"zeta":1,"alpha":2,"mid":3}"#).unwrap();

        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
        assert_eq!(map.get("alpha"), Some(&2));
    }

    #[test]
    fn test_deserialize_duplicate_key_keeps_first_position() {
        let map: OrderedMap<String, i32> =
            serde_json::from_str(r#"{"a":1,"b":2,"a":3}"#).unwrap();

        let entries: Vec<_> = map.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        assert_eq!(entries, [("a".to_string(), 3), ("b".to_string(), 2)]);
    }

    #[test]
    fn test_round_trip() {
        let mut map = OrderedMap::new();
        map.set("c".to_string(), vec_of(3));
        map.set("a".to_string(), vec_of(1));
        map.set("b".to_string(), vec_of(2));

        let json = serde_json::to_string(&map).unwrap();
        let back: OrderedMap<String, Vec<u8>> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }

    fn vec_of(n: u8) -> Vec<u8> {
        (0..n).collect()
    }
}
