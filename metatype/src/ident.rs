//! Identifier normalization.
//!
//! Three pure transducers map declared names onto canonical ids and back
//! onto field names:
//!
//! - [`method_name_to_id`]: attribute name → `AD` id (`a_b` → `a.b`, `a__b` →
//!   `a_b`, `$$` → `$`, `$_$` → `-`, lone `$` dropped)
//! - [`type_name_to_id`]: type simple name → `AD` id for single-element
//!   configurations (`MyVPnConfiguration` → `my.vpn.configuration`)
//! - [`id_to_field_name`]: underscore-delimited id → camelCase field name
//!
//! Each scanner makes a single pass with a small bounded state and no
//! backtracking. Transitions are a single `match` over `(state, char)`.

/// How many `_` followed the `$` that opened a dollar run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Underscores {
    None,
    One,
    Many,
}

impl Underscores {
    fn bump(self) -> Self {
        match self {
            Underscores::None => Underscores::One,
            Underscores::One | Underscores::Many => Underscores::Many,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IdState {
    Normal,
    AfterDollar(Underscores),
    AfterUnderscore,
}

impl IdState {
    fn step(self, c: char, out: &mut String) -> Self {
        match (self, c) {
            (IdState::Normal, '$') => IdState::AfterDollar(Underscores::None),
            (IdState::Normal, '_') => IdState::AfterUnderscore,
            (IdState::Normal, c) => {
                out.push(c);
                IdState::Normal
            }
            (IdState::AfterUnderscore, '_') => {
                out.push('_');
                IdState::Normal
            }
            (IdState::AfterUnderscore, c) => {
                out.push('.');
                out.push(c);
                IdState::Normal
            }
            (IdState::AfterDollar(Underscores::One), '$') => {
                out.push('-');
                IdState::Normal
            }
            (IdState::AfterDollar(_), '$') => {
                out.push('$');
                IdState::Normal
            }
            (IdState::AfterDollar(pending), '_') => IdState::AfterDollar(pending.bump()),
            (IdState::AfterDollar(_), c) => {
                out.push(c);
                IdState::Normal
            }
        }
    }
}

/// Converts an attribute's declared name to its `AD` id.
///
/// A trailing `$` or `_` run that is never completed produces no output.
///
/// ```
/// use metatype::ident::method_name_to_id;
///
/// assert_eq!(method_name_to_id("ethz_id_knowhow_config_solr"), "ethz.id.knowhow.config.solr");
/// assert_eq!(method_name_to_id("many$parts$_$with$$dollar"), "manyparts-with$dollar");
/// ```
#[must_use]
pub fn method_name_to_id(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut state = IdState::Normal;
    for c in name.chars() {
        state = state.step(c, &mut out);
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaseState {
    UpperRun,
    LowerRun,
}

impl CaseState {
    fn step(self, c: char, out: &mut String) -> Self {
        match (self, c.is_uppercase()) {
            (CaseState::UpperRun, true) => {
                out.extend(c.to_lowercase());
                CaseState::UpperRun
            }
            (CaseState::UpperRun, false) => {
                out.push(c);
                CaseState::LowerRun
            }
            (CaseState::LowerRun, true) => {
                out.push('.');
                out.extend(c.to_lowercase());
                CaseState::UpperRun
            }
            (CaseState::LowerRun, false) => {
                out.push(c);
                CaseState::LowerRun
            }
        }
    }
}

/// Derives the `AD` id of a single-element configuration from its type name.
///
/// A `.` is inserted at every lower→upper boundary and everything is
/// lowercased; uppercase runs (acronyms) stay together.
///
/// ```
/// use metatype::ident::type_name_to_id;
///
/// assert_eq!(type_name_to_id("MyVPnConfiguration"), "my.vpn.configuration");
/// ```
#[must_use]
pub fn type_name_to_id(type_name: &str) -> String {
    let mut out = String::with_capacity(type_name.len() + 4);
    let mut state = CaseState::UpperRun;
    for c in type_name.chars() {
        state = state.step(c, &mut out);
    }
    out
}

/// Converts an underscore-delimited id to a camelCase field name.
///
/// Splits on `_` only; any `.` stays embedded in its segment. Empty segments
/// contribute nothing.
///
/// ```
/// use metatype::ident::id_to_field_name;
///
/// assert_eq!(id_to_field_name("ethz_id_knowhow_config_solr"), "ethzIdKnowhowConfigSolr");
/// ```
#[must_use]
pub fn id_to_field_name(id: &str) -> String {
    let joined: String = id.split('_').map(capitalize).collect();
    let mut chars = joined.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Uppercases the first character of `s`.
#[must_use]
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn method_name_plain() {
        assert_eq!(method_name_to_id("simpleName"), "simpleName");
    }

    #[test]
    fn method_name_with_underscores() {
        assert_eq!(
            method_name_to_id("ethz_id_knowhow_config_solr"),
            "ethz.id.knowhow.config.solr"
        );
        assert_eq!(method_name_to_id("double__under"), "double_under");
        assert_eq!(method_name_to_id("double__under_path"), "double_under.path");
        assert_eq!(
            method_name_to_id("double__under_path__part"),
            "double_under.path_part"
        );
    }

    #[test]
    fn method_name_with_dollars() {
        assert_eq!(method_name_to_id("name$with$dollar"), "namewithdollar");
        assert_eq!(method_name_to_id("name$$with$$dollar"), "name$with$dollar");
        assert_eq!(method_name_to_id("name$_$with$_$dollar"), "name-with-dollar");
        assert_eq!(
            method_name_to_id("many$parts$_$with$$dollar"),
            "manyparts-with$dollar"
        );
    }

    #[test]
    fn method_name_edge_runs() {
        // Pending runs at the end of input are dropped.
        assert_eq!(method_name_to_id("trailing_"), "trailing");
        assert_eq!(method_name_to_id("trailing$"), "trailing");
        // Only exactly one underscore between dollars makes a hyphen.
        assert_eq!(method_name_to_id("a$__$b"), "a$b");
        // `$_` followed by anything but `$` drops the whole run.
        assert_eq!(method_name_to_id("a$_b"), "ab");
        // An underscore before a dollar separates, the dollar is kept.
        assert_eq!(method_name_to_id("a_$b"), "a.$b");
        assert_eq!(method_name_to_id(""), "");
    }

    #[test]
    fn type_name_golden() {
        assert_eq!(type_name_to_id("Configuration"), "configuration");
        assert_eq!(type_name_to_id("MyConfiguration"), "my.configuration");
        assert_eq!(type_name_to_id("CONfiguration"), "configuration");
        assert_eq!(type_name_to_id("MyVPnConfiguration"), "my.vpn.configuration");
    }

    #[test]
    fn type_name_leading_lowercase() {
        assert_eq!(type_name_to_id("myConfig"), "my.config");
        assert_eq!(type_name_to_id("a1B"), "a1.b");
    }

    #[test]
    fn field_name_golden() {
        assert_eq!(
            id_to_field_name("ethz_id_knowhow_config_solr"),
            "ethzIdKnowhowConfigSolr"
        );
    }

    #[test]
    fn field_name_keeps_dots_inside_segments() {
        assert_eq!(id_to_field_name("ethz.id_solr"), "ethz.idSolr");
        assert_eq!(id_to_field_name("Timeout"), "timeout");
        assert_eq!(id_to_field_name("a__b"), "aB");
        assert_eq!(id_to_field_name(""), "");
    }

    #[test]
    fn field_name_of_transformed_id() {
        let id = method_name_to_id("ethz_id_knowhow_config_solr");
        assert_eq!(id_to_field_name(&id), "ethz.id.knowhow.config.solr");
    }

    proptest! {
        #[test]
        fn method_name_is_deterministic(name in "[a-zA-Z0-9_$]{0,24}") {
            prop_assert_eq!(method_name_to_id(&name), method_name_to_id(&name));
        }

        #[test]
        fn method_name_without_markers_is_identity(name in "[a-zA-Z0-9]{0,24}") {
            prop_assert_eq!(method_name_to_id(&name), name);
        }

        #[test]
        fn method_name_never_grows(name in "[a-zA-Z0-9_$]{0,24}") {
            prop_assert!(method_name_to_id(&name).len() <= name.len());
        }

        #[test]
        fn type_name_only_inserts_dots(name in "[a-zA-Z0-9]{0,24}") {
            let id = type_name_to_id(&name);
            prop_assert!(!id.chars().any(|c| c.is_ascii_uppercase()));
            prop_assert_eq!(id.replace('.', ""), name.to_lowercase());
        }

        #[test]
        fn type_name_is_deterministic(name in "[a-zA-Z]{0,24}") {
            let first = type_name_to_id(&name);
            let _ = type_name_to_id("InterleavedCall");
            prop_assert_eq!(type_name_to_id(&name), first);
        }
    }
}
