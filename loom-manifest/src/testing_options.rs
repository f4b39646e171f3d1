//! Testing option flags.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// A single testing flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TestingOption {
    /// Run test classes in parallel.
    Parallelizable,
    /// Randomize the order tests run in.
    RandomExecutionOrdering,
}

impl TestingOption {
    pub const ALL: [TestingOption; 2] = [Self::Parallelizable, Self::RandomExecutionOrdering];

    /// The wire name of this flag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Parallelizable => "parallelizable",
            Self::RandomExecutionOrdering => "random_execution_ordering",
        }
    }

    fn bit(self) -> u8 {
        match self {
            Self::Parallelizable => 1 << 0,
            Self::RandomExecutionOrdering => 1 << 1,
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flag| flag.as_str() == name)
    }
}

impl fmt::Display for TestingOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of [`TestingOption`] flags, stored as a bitmask.
///
/// Encoded as a list of flag names in canonical order. Decoding accepts the
/// names in any order (duplicates collapse) or the raw bitmask integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TestingOptions(u8);

impl TestingOptions {
    const MASK: u8 = 0b11;

    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn all() -> Self {
        TestingOption::ALL.into_iter().collect()
    }

    /// Build from a raw bitmask, rejecting unknown bits.
    pub fn from_bits(bits: u8) -> Option<Self> {
        (bits & !Self::MASK == 0).then_some(Self(bits))
    }

    pub fn bits(&self) -> u8 {
        self.0
    }

    pub fn contains(&self, flag: TestingOption) -> bool {
        self.0 & flag.bit() != 0
    }

    pub fn insert(&mut self, flag: TestingOption) {
        self.0 |= flag.bit();
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Present flags in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = TestingOption> + '_ {
        TestingOption::ALL
            .into_iter()
            .filter(|flag| self.contains(*flag))
    }
}

impl FromIterator<TestingOption> for TestingOptions {
    fn from_iter<I: IntoIterator<Item = TestingOption>>(iter: I) -> Self {
        let mut options = Self::empty();
        for flag in iter {
            options.insert(flag);
        }
        options
    }
}

impl<const N: usize> From<[TestingOption; N]> for TestingOptions {
    fn from(flags: [TestingOption; N]) -> Self {
        flags.into_iter().collect()
    }
}

impl Serialize for TestingOptions {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.iter().map(|flag| flag.as_str()))
    }
}

impl<'de> Deserialize<'de> for TestingOptions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OptionsVisitor;

        impl<'de> de::Visitor<'de> for OptionsVisitor {
            type Value = TestingOptions;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a list of testing option names or a bitmask")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut options = TestingOptions::empty();
                while let Some(name) = seq.next_element::<String>()? {
                    let flag = TestingOption::from_name(&name).ok_or_else(|| {
                        de::Error::unknown_variant(&name, &["parallelizable", "random_execution_ordering"])
                    })?;
                    options.insert(flag);
                }
                Ok(options)
            }

            fn visit_u64<E>(self, bits: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                u8::try_from(bits)
                    .ok()
                    .and_then(TestingOptions::from_bits)
                    .ok_or_else(|| de::Error::custom(format!("unknown testing option bits {bits:#b}")))
            }

            fn visit_i64<E>(self, bits: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                let bits = u64::try_from(bits)
                    .map_err(|_| de::Error::custom("testing option bitmask cannot be negative"))?;
                self.visit_u64(bits)
            }
        }

        deserializer.deserialize_any(OptionsVisitor)
    }
}
