use crate::types::{OrderedFloat, SizeRange, StructMember, StructShape, TypeKey};

#[test]
fn size_range_containment() {
    let wide = SizeRange::new(0, 10);
    let narrow = SizeRange::new(2, 5);
    assert!(wide.contains(narrow));
    assert!(!narrow.contains(wide));
    assert!(SizeRange::DEFAULT.contains(wide));
    assert!(narrow.includes(2));
    assert!(narrow.includes(5));
    assert!(!narrow.includes(6));
    assert!(SizeRange::exact(3).contains(SizeRange::exact(3)));
}

#[test]
fn size_range_merge_covers_both() {
    let merged = SizeRange::new(2, 5).merge(SizeRange::new(4, 9));
    assert_eq!(merged, SizeRange::new(2, 9));
    assert_eq!(
        SizeRange::exact(1).merge(SizeRange::exact(4)),
        SizeRange::new(1, 4)
    );
}

#[test]
fn ordered_float_is_totally_ordered() {
    assert_eq!(OrderedFloat(1.5), OrderedFloat(1.5));
    assert_ne!(OrderedFloat(1.5), OrderedFloat(1.6));
    assert!(OrderedFloat(1.0) < OrderedFloat(2.0));
    assert!(OrderedFloat(f64::NEG_INFINITY) < OrderedFloat(0.0));
    assert!(OrderedFloat(0.0) < OrderedFloat(f64::INFINITY));
    // NaN equals itself by bit pattern, so it can live in interned keys.
    assert_eq!(OrderedFloat(f64::NAN), OrderedFloat(f64::NAN));
}

#[test]
fn struct_shape_size_counts_required_members() {
    let a = lattix_common::interner::Atom(0);
    let b = lattix_common::interner::Atom(1);
    let shape = StructShape {
        members: vec![
            StructMember::required(a, crate::types::TypeId::ANY),
            StructMember::optional(b, crate::types::TypeId::ANY),
        ],
    };
    assert_eq!(shape.required_count(), 1);
    assert_eq!(shape.size_range(), SizeRange::new(1, 2));
    assert!(shape.find(a).is_some());
    assert!(shape.find(a).map(|m| !m.optional).unwrap_or(false));
}

#[test]
fn kind_names_strip_structure() {
    assert_eq!(TypeKey::Any.kind_name(), "Any");
    assert_eq!(TypeKey::Integer { min: 1, max: 5 }.kind_name(), "Integer");
    assert_eq!(
        TypeKey::Float {
            min: OrderedFloat(0.0),
            max: OrderedFloat(1.0)
        }
        .kind_name(),
        "Float"
    );
}
