//! The unified checker policy, replacing three parallel
//! `stage_one`/`lax`/`weak` checker variants with one implementation
//! parameterized by a record.

/// How `complex_check`'s abstract-result indicator should be reported.
///
/// The source's `stage_one`/`lax` variants return a plain `bool` (is this
/// instance a standin?); `weak` returns a pair distinguishing "is itself a
/// standin" from "descends from one". `Strong` models the former, `Weak`
/// the latter — the resolver always computes both, and a policy just picks
/// which one callers see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParametricResultShape {
    Strong,
    Weak,
}

/// The four axes along which the three source checker variants differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckerPolicy {
    /// Whether `Tuple`/`List`/`Map` type-instance categories are resolved at
    /// all, or rejected outright (stage_one/lax only ever see `User`).
    pub allow_containers: bool,
    /// Whether a constructor parameter that fails resolution but
    /// syntactically matches the type it belongs to is accepted anyway
    /// (recursive data types).
    pub allow_self_reference: bool,
    /// Whether a public type's constructor may not depend on a private type.
    pub enforce_visibility: bool,
    pub parametric_result_shape: ParametricResultShape,
}

impl CheckerPolicy {
    pub const STAGE_ONE: CheckerPolicy = CheckerPolicy {
        allow_containers: false,
        allow_self_reference: false,
        enforce_visibility: false,
        parametric_result_shape: ParametricResultShape::Strong,
    };

    pub const LAX: CheckerPolicy = CheckerPolicy {
        allow_containers: false,
        allow_self_reference: false,
        enforce_visibility: false,
        parametric_result_shape: ParametricResultShape::Strong,
    };

    pub const WEAK: CheckerPolicy = CheckerPolicy {
        allow_containers: true,
        allow_self_reference: true,
        enforce_visibility: true,
        parametric_result_shape: ParametricResultShape::Weak,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_one_and_lax_share_shape_but_weak_diverges() {
        assert_eq!(CheckerPolicy::STAGE_ONE, CheckerPolicy::LAX);
        assert_ne!(CheckerPolicy::STAGE_ONE, CheckerPolicy::WEAK);
        assert!(CheckerPolicy::WEAK.allow_containers);
        assert!(!CheckerPolicy::STAGE_ONE.allow_containers);
    }
}
