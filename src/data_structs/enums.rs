use std::fmt::Display;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};

use crate::error::MwuError;

/// Group tag of an observation.
#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, PartialOrd, Ord)]
pub enum Group {
    /// First group, reported first in set sizes.
    A,
    /// Second group.
    B,
}

impl Group {
    pub fn other(self) -> Self {
        match self {
            Group::A => Group::B,
            Group::B => Group::A,
        }
    }
}

impl Display for Group {
    #[cfg_attr(coverage_nightly, coverage(off))]
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Group::A => write!(f, "A"),
            Group::B => write!(f, "B"),
        }
    }
}

impl FromStr for Group {
    type Err = MwuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" | "1" => Ok(Group::A),
            "B" | "2" => Ok(Group::B),
            other => Err(MwuError::UnknownGroup(other.to_string())),
        }
    }
}

impl Serialize for Group {
    fn serialize<S>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer, {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Group {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>, {
        let s = String::deserialize(deserializer)?;
        Group::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Direction in which an outcome counts as extreme.
#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tail {
    /// Small values of U are extreme.
    Lower,
    /// Large values of U are extreme.
    Upper,
}

/// What the exact method reports for an observed U.
#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "console", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ExactMode {
    /// Probability mass of the observed U alone.
    #[default]
    Point,
    /// Probability mass of the observed U and everything beyond it.
    Cumulative,
}

/// Numerical method that produced a probability.
#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Exact,
    Normal,
    Uniform,
}

impl Display for Method {
    #[cfg_attr(coverage_nightly, coverage(off))]
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Method::Exact => write!(f, "exact"),
            Method::Normal => write!(f, "normal"),
            Method::Uniform => write!(f, "uniform"),
        }
    }
}

/// How a test run picks its [`Method`].
#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "console", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Exact for small untied samples, normal otherwise.
    #[default]
    Auto,
    Exact,
    Normal,
    Uniform,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("A", Group::A)]
    #[case("a", Group::A)]
    #[case("1", Group::A)]
    #[case("B", Group::B)]
    #[case(" b ", Group::B)]
    #[case("2", Group::B)]
    fn test_group_from_str(
        #[case] label: &str,
        #[case] expected: Group,
    ) {
        assert_eq!(Group::from_str(label).unwrap(), expected);
    }

    #[test]
    fn test_group_unknown() {
        assert_eq!(
            Group::from_str("C"),
            Err(MwuError::UnknownGroup("C".to_string()))
        );
    }

    #[test]
    fn test_group_other() {
        assert_eq!(Group::A.other(), Group::B);
        assert_eq!(Group::B.other(), Group::A);
    }

    #[test]
    fn test_group_serde() {
        let json = serde_json::to_string(&Group::B).unwrap();
        assert_eq!(json, "\"B\"");
        let group: Group = serde_json::from_str("\"a\"").unwrap();
        assert_eq!(group, Group::A);
    }

    #[test]
    fn test_strategy_serde() {
        let strategy: Strategy = serde_json::from_str("\"uniform\"").unwrap();
        assert_eq!(strategy, Strategy::Uniform);
        assert_eq!(
            serde_json::to_string(&ExactMode::Cumulative).unwrap(),
            "\"cumulative\""
        );
    }
}
