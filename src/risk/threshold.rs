use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comparator {
    Lt,
    Le,
    Gt,
    Ge,
}

/// Token table used to resolve comparators.
const COMPARATORS: [(&str, Comparator); 4] = [
    ("<", Comparator::Lt),
    ("<=", Comparator::Le),
    (">", Comparator::Gt),
    (">=", Comparator::Ge),
];

impl Comparator {
    pub fn from_token(token: &str) -> Result<Self> {
        COMPARATORS
            .iter()
            .find(|(t, _)| *t == token)
            .map(|(_, comparator)| *comparator)
            .ok_or_else(|| Error::UnsupportedComparator(token.to_string()))
    }

    pub fn token(&self) -> &'static str {
        match self {
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }

    /// `observed <op> threshold`
    pub fn compare(&self, observed: f64, threshold: f64) -> bool {
        match self {
            Self::Lt => observed < threshold,
            Self::Le => observed <= threshold,
            Self::Gt => observed > threshold,
            Self::Ge => observed >= threshold,
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A parsed threshold cell such as `"< 80"`.
///
/// The bound is coerced to a number when the cell is parsed, so comparisons
/// are numeric (`99 < 80` is false) rather than lexical.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThresholdExpr {
    pub comparator: Comparator,
    pub value: f64,
}

impl ThresholdExpr {
    pub fn new(comparator: Comparator, value: f64) -> Self {
        Self { comparator, value }
    }

    pub fn is_satisfied_by(&self, observed: f64) -> bool {
        self.comparator.compare(observed, self.value)
    }
}

impl FromStr for ThresholdExpr {
    type Err = Error;

    fn from_str(expression: &str) -> Result<Self> {
        let tokens: Vec<&str> = expression.split_whitespace().collect();
        let [comparator, value] = tokens.as_slice() else {
            return Err(Error::malformed_threshold(
                expression,
                format!("expected '<comparator> <number>', found {} token(s)", tokens.len()),
            ));
        };

        let value = value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| {
                Error::malformed_threshold(expression, format!("'{}' is not a finite number", value))
            })?;
        let comparator = Comparator::from_token(comparator)?;

        Ok(Self { comparator, value })
    }
}

impl fmt::Display for ThresholdExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.comparator, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_each_comparator() {
        let cases = [
            ("< 5", Comparator::Lt, 5.0),
            ("<= 10", Comparator::Le, 10.0),
            ("> 0.5", Comparator::Gt, 0.5),
            (">= 80", Comparator::Ge, 80.0),
        ];
        for (text, comparator, value) in cases {
            let expr: ThresholdExpr = text.parse().unwrap();
            assert_eq!(expr, ThresholdExpr::new(comparator, value));
        }
    }

    #[test]
    fn test_parse_tolerates_extra_whitespace() {
        let expr: ThresholdExpr = "  <   80 ".parse().unwrap();
        assert_eq!(expr.to_string(), "< 80");
    }

    #[test]
    fn test_boundary_semantics() {
        assert!(!"< 80".parse::<ThresholdExpr>().unwrap().is_satisfied_by(80.0));
        assert!("<= 80".parse::<ThresholdExpr>().unwrap().is_satisfied_by(80.0));
        assert!(!"> 80".parse::<ThresholdExpr>().unwrap().is_satisfied_by(80.0));
        assert!(">= 80".parse::<ThresholdExpr>().unwrap().is_satisfied_by(80.0));
    }

    #[test]
    fn test_numeric_not_lexical_comparison() {
        let expr: ThresholdExpr = "< 80".parse().unwrap();
        assert!(!expr.is_satisfied_by(99.0));
        assert!(expr.is_satisfied_by(9.0));
    }

    #[test]
    fn test_unsupported_comparator() {
        let err = "== 5".parse::<ThresholdExpr>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedComparator(token) if token == "=="));
    }

    #[test]
    fn test_malformed_expressions() {
        for text in ["", "<5", "< 5 extra", "< five", "<"] {
            let err = text.parse::<ThresholdExpr>().unwrap_err();
            assert!(
                matches!(err, Error::MalformedThresholdExpression { .. }),
                "'{}' parsed as {:?}",
                text,
                err
            );
        }
    }

    #[test]
    fn test_non_finite_bound_rejected() {
        for text in ["< NaN", "< nan", "<= inf", "> -inf", ">= infinity"] {
            let err = text.parse::<ThresholdExpr>().unwrap_err();
            assert!(
                matches!(err, Error::MalformedThresholdExpression { .. }),
                "'{}' parsed as {:?}",
                text,
                err
            );
        }
    }

    #[test]
    fn test_display_round_trips() {
        for text in ["< 5", "<= 10", "> 0.5", ">= 80"] {
            let expr: ThresholdExpr = text.parse().unwrap();
            assert_eq!(expr.to_string(), text);
        }
    }
}
