//! Derive the in-scope class names one parsed unit refers to.

use crate::unit::{ImportDecl, ParsedUnit};
use classlink_core::names::{QualifiedClassName, in_scope};
use std::collections::BTreeSet;

/// Collect every class under `base_namespace` that `unit` references through
/// its imports, static imports, and the `extends` / `implements` clauses of
/// its declared types.
///
/// Names under the reserved `java.` root are always excluded. The namespace
/// test is a plain string prefix (see [`in_scope`]).
pub fn extract_references(unit: &ParsedUnit, base_namespace: &str) -> BTreeSet<QualifiedClassName> {
    let mut linked = BTreeSet::new();

    for import in &unit.imports {
        if let Some(class_name) = import_owner(import) {
            add_if_in_scope(&mut linked, class_name, base_namespace);
        }
    }

    let package = unit.package_name();
    for decl in &unit.types {
        for supertype in decl.extends.iter().chain(&decl.implements) {
            add_if_in_scope(&mut linked, qualify(supertype, package), base_namespace);
        }
    }

    linked
}

/// Class named by an import. A static import names a member, so its owning
/// class is the name minus the final segment. Non-static wildcard imports
/// name a package and yield nothing.
fn import_owner(import: &ImportDecl) -> Option<String> {
    match (import.is_static, import.is_wildcard) {
        (false, false) => Some(import.name.clone()),
        (false, true) => None,
        // `import static a.B.*` already names the owner `a.B`; no segment is dropped.
        (true, true) => Some(import.name.clone()),
        (true, false) => Some(
            import
                .name
                .rsplit_once('.')
                .map(|(owner, _member)| owner.to_string())
                .unwrap_or_default(),
        ),
    }
}

/// Qualify a simple supertype name with the unit's package. With no package
/// declared the result keeps a leading dot (`.Base`).
fn qualify(name: &str, package: &str) -> String {
    if name.contains('.') {
        name.to_string()
    } else {
        format!("{package}.{name}")
    }
}

fn add_if_in_scope(linked: &mut BTreeSet<QualifiedClassName>, name: String, base: &str) {
    if !in_scope(&name, base) {
        return;
    }
    if let Ok(name) = QualifiedClassName::new(name) {
        linked.insert(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_import_without_dot_has_no_owner() {
        let import = ImportDecl::static_member("Lonely");
        assert_eq!(import_owner(&import), Some(String::new()));
    }

    #[test]
    fn qualify_keeps_dotted_names() {
        assert_eq!(qualify("com.ex.Base", "org.other"), "com.ex.Base");
        assert_eq!(qualify("Base", "com.ex"), "com.ex.Base");
        assert_eq!(qualify("Base", ""), ".Base");
    }
}
