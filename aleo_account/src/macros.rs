/// Implements Serialize and Deserialize through the type's Display and
/// FromStr so keys and addresses serialize as their text form.
#[doc(hidden)]
#[macro_export]
macro_rules! impl_serde_via_string {
    ($type:ident) => {
        #[cfg(feature = "serde")]
        impl serde::Serialize for $type {
            fn serialize<Ser: serde::Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
                serializer.collect_str(self)
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> serde::Deserialize<'de> for $type {
            fn deserialize<Deser: serde::Deserializer<'de>>(
                deserializer: Deser,
            ) -> Result<$type, Deser::Error> {
                struct StrVisitor;
                impl<'de> serde::de::Visitor<'de> for StrVisitor {
                    type Value = $type;

                    fn expecting(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                        write!(f, "a valid {} string", stringify!($type))
                    }

                    fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<$type, E> {
                        <$type as core::str::FromStr>::from_str(v).map_err(E::custom)
                    }
                }

                deserializer.deserialize_str(StrVisitor)
            }
        }
    };
}
