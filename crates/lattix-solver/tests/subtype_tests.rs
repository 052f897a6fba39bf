use crate::db::TypeDatabase;
use crate::intern::TypeInterner;
use crate::subtype::{AssignabilityChecker, is_assignable, is_assignable_opt, is_instance};
use crate::types::{SizeRange, StructMember, TypeId};
use crate::values::Value;

#[test]
fn every_type_is_assignable_to_any() {
    let db = TypeInterner::new();
    for id in db.well_known_types() {
        assert!(
            is_assignable(&db, TypeId::ANY, id),
            "Any should accept {id:?}"
        );
    }
}

#[test]
fn every_type_is_assignable_to_itself() {
    let db = TypeInterner::new();
    for id in db.well_known_types() {
        assert!(is_assignable(&db, id, id), "{id:?} should accept itself");
    }
}

#[test]
fn no_type_is_assignable_from_absence() {
    let db = TypeInterner::new();
    for id in db.well_known_types() {
        assert!(!is_assignable_opt(&db, id, None));
    }
}

#[test]
fn unit_is_assignable_to_everything() {
    let db = TypeInterner::new();
    for id in db.well_known_types() {
        assert!(
            is_assignable(&db, id, TypeId::UNIT),
            "{id:?} should accept Unit"
        );
    }
    // The reverse holds only for Unit itself.
    assert!(!is_assignable(&db, TypeId::UNIT, TypeId::INTEGER));
    assert!(!is_assignable(&db, TypeId::UNIT, TypeId::ANY));
}

#[test]
fn integer_bounds_are_subset_checked() {
    let db = TypeInterner::new();
    let wide = db.integer(0, 100);
    let narrow = db.integer(10, 20);
    assert!(is_assignable(&db, wide, narrow));
    assert!(!is_assignable(&db, narrow, wide));
    assert!(is_assignable(&db, TypeId::INTEGER, narrow));
    assert!(!is_assignable(&db, narrow, TypeId::INTEGER));
}

#[test]
fn float_and_integer_do_not_mix() {
    let db = TypeInterner::new();
    assert!(!is_assignable(&db, TypeId::FLOAT, TypeId::INTEGER));
    assert!(!is_assignable(&db, TypeId::INTEGER, TypeId::FLOAT));
    assert!(is_assignable(&db, TypeId::NUMERIC, TypeId::INTEGER));
    assert!(is_assignable(&db, TypeId::NUMERIC, TypeId::FLOAT));
    assert!(is_assignable(&db, TypeId::NUMERIC, db.float(1.5, 2.5)));
}

#[test]
fn string_literals_and_sizes() {
    let db = TypeInterner::new();
    let abc = db.string_value("abc");
    let sized = db.string_sized(SizeRange::new(1, 5));
    assert!(is_assignable(&db, TypeId::STRING, abc));
    assert!(is_assignable(&db, sized, abc));
    assert!(!is_assignable(&db, db.string_sized(SizeRange::new(4, 5)), abc));
    assert!(is_assignable(&db, abc, db.string_value("abc")));
    assert!(!is_assignable(&db, abc, db.string_value("abd")));
    // A literal target never accepts a bare sized string.
    assert!(!is_assignable(&db, abc, sized));
}

#[test]
fn pattern_uses_full_match_semantics() {
    let db = TypeInterner::new();
    let pattern = db.pattern(vec![db.regexp("[abc]+")]);
    assert!(is_assignable(&db, pattern, db.string_value("abc")));
    assert!(!is_assignable(&db, pattern, db.string_value("abcx")));
    // Content is constrained, so a bare String source is not enough.
    assert!(!is_assignable(&db, pattern, TypeId::STRING));
    // But the unconstrained String target accepts any pattern.
    assert!(is_assignable(&db, TypeId::STRING, pattern));
}

#[test]
fn pattern_value_instance_check() {
    let db = TypeInterner::new();
    let pattern = db.pattern(vec![db.regexp("[abc]+")]);
    assert!(is_instance(&db, pattern, &Value::from("abc")));
    assert!(!is_instance(&db, pattern, &Value::from("abcx")));
}

#[test]
fn regexp_types_compare_by_pattern() {
    let db = TypeInterner::new();
    let word = db.regexp("\\w+");
    assert!(is_assignable(&db, TypeId::REGEXP, word));
    assert!(is_assignable(&db, word, word));
    assert!(!is_assignable(&db, word, db.regexp("\\d+")));
    assert!(!is_assignable(&db, word, TypeId::REGEXP));
}

#[test]
fn array_assignability_checks_element_and_size() {
    let db = TypeInterner::new();
    let ints = db.array(TypeId::INTEGER, SizeRange::new(1, 5));
    let small = db.array(db.integer(0, 9), SizeRange::exact(3));
    assert!(is_assignable(&db, ints, small));
    assert!(!is_assignable(&db, small, ints));
    let strings = db.array(TypeId::STRING, SizeRange::exact(3));
    assert!(!is_assignable(&db, ints, strings));
    let too_long = db.array(TypeId::INTEGER, SizeRange::exact(9));
    assert!(!is_assignable(&db, ints, too_long));
}

#[test]
fn empty_array_is_vacuously_assignable_to_any_array() {
    let db = TypeInterner::new();
    // Even when the target's own size bounds exclude zero: there are no
    // elements for any constraint to reject.
    let bounded = db.array(TypeId::INTEGER, SizeRange::new(5, 10));
    assert!(is_assignable(&db, bounded, TypeId::EMPTY_ARRAY));
    assert!(is_assignable(&db, TypeId::ARRAY, TypeId::EMPTY_ARRAY));
    assert!(is_assignable(&db, db.array(TypeId::STRING, SizeRange::DEFAULT), TypeId::EMPTY_ARRAY));
}

#[test]
fn tuple_matches_positionally() {
    let db = TypeInterner::new();
    let triple = db.tuple(vec![TypeId::INTEGER, TypeId::INTEGER, TypeId::INTEGER]);
    let literal = db.tuple(vec![db.integer(1, 1), db.integer(2, 2), db.integer(3, 3)]);
    assert!(is_assignable(&db, triple, literal));
    assert!(!is_assignable(&db, literal, triple));
    let pair = db.tuple(vec![TypeId::INTEGER, TypeId::INTEGER]);
    assert!(!is_assignable(&db, triple, pair));
    // A tuple is an array of fixed shape.
    assert!(is_assignable(&db, TypeId::ARRAY, triple));
    assert!(is_assignable(
        &db,
        db.array(TypeId::INTEGER, SizeRange::new(2, 4)),
        triple
    ));
    // An array source fits a tuple only at exactly the tuple's arity.
    let exact = db.array(TypeId::INTEGER, SizeRange::exact(3));
    assert!(is_assignable(&db, triple, exact));
    let loose = db.array(TypeId::INTEGER, SizeRange::new(2, 3));
    assert!(!is_assignable(&db, triple, loose));
}

#[test]
fn hash_assignability_checks_keys_values_size() {
    let db = TypeInterner::new();
    let target = db.hash(TypeId::STRING, TypeId::INTEGER, SizeRange::DEFAULT);
    let source = db.hash(db.string_value("a"), db.integer(1, 1), SizeRange::exact(1));
    assert!(is_assignable(&db, target, source));
    assert!(!is_assignable(
        &db,
        db.hash(TypeId::INTEGER, TypeId::INTEGER, SizeRange::DEFAULT),
        source
    ));
    assert!(is_assignable(&db, target, TypeId::EMPTY_HASH));
    assert!(is_assignable(&db, TypeId::HASH, source));
}

#[test]
fn struct_requires_keys_and_rejects_unknown_ones() {
    let db = TypeInterner::new();
    let a = db.intern_atom("a");
    let b = db.intern_atom("b");
    let target = db.struct_of(vec![
        StructMember::required(a, TypeId::INTEGER),
        StructMember::optional(b, TypeId::STRING),
    ]);

    let with_a = db.struct_of(vec![StructMember::required(a, db.integer(1, 1))]);
    assert!(is_assignable(&db, target, with_a));

    let with_both = db.struct_of(vec![
        StructMember::required(a, db.integer(1, 1)),
        StructMember::required(b, db.string_value("x")),
    ]);
    assert!(is_assignable(&db, target, with_both));

    // Missing required member.
    let only_b = db.struct_of(vec![StructMember::required(b, db.string_value("x"))]);
    assert!(!is_assignable(&db, target, only_b));

    // Unknown key.
    let c = db.intern_atom("c");
    let with_extra = db.struct_of(vec![
        StructMember::required(a, db.integer(1, 1)),
        StructMember::required(c, TypeId::BOOLEAN),
    ]);
    assert!(!is_assignable(&db, target, with_extra));

    // An optional source member cannot satisfy a required target member.
    let maybe_a = db.struct_of(vec![StructMember::optional(a, TypeId::INTEGER)]);
    assert!(!is_assignable(&db, target, maybe_a));
}

#[test]
fn struct_and_hash_cross_assignability() {
    let db = TypeInterner::new();
    let a = db.intern_atom("a");
    let target = db.struct_of(vec![StructMember::required(a, TypeId::INTEGER)]);
    let hash = db.hash(TypeId::STRING, TypeId::INTEGER, SizeRange::exact(1));
    assert!(is_assignable(&db, target, hash));
    // Value type too loose for the member.
    let loose = db.hash(TypeId::STRING, TypeId::ANY, SizeRange::exact(1));
    assert!(!is_assignable(&db, target, loose));
    // Struct source against a hash target.
    let hash_target = db.hash(TypeId::STRING, TypeId::NUMERIC, SizeRange::DEFAULT);
    assert!(is_assignable(&db, hash_target, target));
    // The empty hash fits a struct whose members are all optional.
    let optionals = db.struct_of(vec![StructMember::optional(a, TypeId::INTEGER)]);
    assert!(is_assignable(&db, optionals, TypeId::EMPTY_HASH));
    assert!(!is_assignable(&db, target, TypeId::EMPTY_HASH));
}

#[test]
fn collection_accepts_sized_containers() {
    let db = TypeInterner::new();
    let up_to_three = db.collection(SizeRange::new(0, 3));
    assert!(is_assignable(&db, TypeId::COLLECTION, TypeId::ARRAY));
    assert!(is_assignable(&db, TypeId::COLLECTION, TypeId::HASH));
    assert!(is_assignable(
        &db,
        up_to_three,
        db.array(TypeId::INTEGER, SizeRange::exact(2))
    ));
    assert!(!is_assignable(
        &db,
        up_to_three,
        db.array(TypeId::INTEGER, SizeRange::exact(5))
    ));
    assert!(is_assignable(
        &db,
        up_to_three,
        db.tuple(vec![TypeId::INTEGER, TypeId::STRING])
    ));
    assert!(!is_assignable(&db, up_to_three, TypeId::INTEGER));
}

#[test]
fn optional_wraps_undef_in() {
    let db = TypeInterner::new();
    let opt_int = db.optional(TypeId::INTEGER);
    assert!(is_assignable(&db, opt_int, TypeId::UNDEF));
    assert!(is_assignable(&db, opt_int, db.integer(5, 5)));
    assert!(!is_assignable(&db, opt_int, TypeId::STRING));
    assert!(is_assignable(&db, opt_int, db.optional(db.integer(1, 2))));
    assert!(!is_assignable(&db, opt_int, db.optional(TypeId::STRING)));
    assert!(!is_assignable(&db, TypeId::INTEGER, opt_int));
}

#[test]
fn not_undef_excludes_undef() {
    let db = TypeInterner::new();
    let non_undef = db.not_undef(TypeId::ANY);
    assert!(is_assignable(&db, non_undef, TypeId::INTEGER));
    assert!(!is_assignable(&db, non_undef, TypeId::UNDEF));
    assert!(!is_assignable(&db, non_undef, db.optional(TypeId::INTEGER)));
    assert!(!is_assignable(&db, non_undef, TypeId::ANY));

    // As a source, NotUndef[D] reduces to D when D already excludes Undef.
    assert!(is_assignable(&db, TypeId::INTEGER, db.not_undef(TypeId::INTEGER)));
    // NotUndef[Any] may still hold strings, so Integer must refuse it.
    assert!(!is_assignable(&db, TypeId::INTEGER, non_undef));
    assert!(is_assignable(&db, non_undef, db.not_undef(TypeId::INTEGER)));
}

#[test]
fn variant_source_needs_every_arm() {
    let db = TypeInterner::new();
    let scalars = db.variant(vec![TypeId::INTEGER, TypeId::STRING]);
    assert!(is_assignable(&db, TypeId::SCALAR, scalars));
    assert!(!is_assignable(&db, TypeId::INTEGER, scalars));
}

#[test]
fn variant_target_needs_some_arm() {
    let db = TypeInterner::new();
    let int_or_string = db.variant(vec![TypeId::INTEGER, TypeId::STRING]);
    assert!(is_assignable(&db, int_or_string, db.integer(1, 2)));
    assert!(is_assignable(&db, int_or_string, db.string_value("x")));
    assert!(!is_assignable(&db, int_or_string, TypeId::BOOLEAN));

    let with_undef = db.variant(vec![TypeId::INTEGER, TypeId::UNDEF]);
    assert!(is_assignable(&db, with_undef, db.optional(TypeId::INTEGER)));
    assert!(!is_assignable(&db, int_or_string, db.optional(TypeId::INTEGER)));
}

#[test]
fn type_values_are_covariant() {
    let db = TypeInterner::new();
    let of_numeric = db.type_of(Some(TypeId::NUMERIC));
    let of_integer = db.type_of(Some(TypeId::INTEGER));
    assert!(is_assignable(&db, TypeId::TYPE, of_integer));
    assert!(is_assignable(&db, of_numeric, of_integer));
    assert!(!is_assignable(&db, of_integer, of_numeric));
    assert!(!is_assignable(&db, of_integer, TypeId::TYPE));
}

#[test]
fn runtime_kinds_compare_by_name() {
    let db = TypeInterner::new();
    let any_java = db.runtime("java", None);
    let big_decimal = db.runtime("java", Some("java.math.BigDecimal"));
    assert!(is_assignable(&db, any_java, big_decimal));
    assert!(!is_assignable(&db, big_decimal, any_java));
    assert!(!is_assignable(&db, db.runtime("ruby", None), big_decimal));
}

#[test]
fn scalar_anchor_membership() {
    let db = TypeInterner::new();
    for id in [
        TypeId::BOOLEAN,
        TypeId::INTEGER,
        TypeId::FLOAT,
        TypeId::NUMERIC,
        TypeId::STRING,
        TypeId::REGEXP,
        TypeId::SEMVER,
        TypeId::SEMVER_RANGE,
    ] {
        assert!(is_assignable(&db, TypeId::SCALAR, id), "Scalar ⊇ {id:?}");
    }
    assert!(!is_assignable(&db, TypeId::SCALAR, TypeId::ARRAY));
    assert!(!is_assignable(&db, TypeId::SCALAR, TypeId::UNDEF));

    for id in [TypeId::BOOLEAN, TypeId::INTEGER, TypeId::FLOAT, TypeId::NUMERIC, TypeId::STRING] {
        assert!(is_assignable(&db, TypeId::SCALAR_DATA, id), "ScalarData ⊇ {id:?}");
    }
    assert!(!is_assignable(&db, TypeId::SCALAR_DATA, TypeId::REGEXP));
}

#[test]
fn self_recursive_alias_terminates() {
    let db = TypeInterner::new();
    // Tree = Variant[Integer, Array[Tree]]
    let tree_def = db.declare_alias("Tree");
    let tree = db.alias_type(tree_def);
    let body = db.variant(vec![
        TypeId::INTEGER,
        db.array(tree, SizeRange::DEFAULT),
    ]);
    db.resolve_alias(tree_def, body).unwrap();

    assert!(db.is_recursive_alias(tree_def));
    assert!(is_assignable(&db, tree, TypeId::INTEGER));
    assert!(is_assignable(&db, tree, db.array(tree, SizeRange::DEFAULT)));
    assert!(is_assignable(&db, tree, tree));
    assert!(!is_assignable(&db, tree, TypeId::STRING));
    assert!(is_instance(
        &db,
        tree,
        &Value::array_of([Value::from(1), Value::array_of([Value::from(2)])])
    ));
    assert!(!is_instance(&db, tree, &Value::from("leaf")));
}

#[test]
fn mutually_recursive_aliases_are_mutually_assignable() {
    let db = TypeInterner::new();
    // A = Variant[Integer, Array[B]]; B = Variant[Integer, Array[A]].
    // The cycle closes with self-recursion on both sides; the walk must
    // terminate and approve.
    let a_def = db.declare_alias("A");
    let b_def = db.declare_alias("B");
    let a = db.alias_type(a_def);
    let b = db.alias_type(b_def);
    db.resolve_alias(
        a_def,
        db.variant(vec![TypeId::INTEGER, db.array(b, SizeRange::DEFAULT)]),
    )
    .unwrap();
    db.resolve_alias(
        b_def,
        db.variant(vec![TypeId::INTEGER, db.array(a, SizeRange::DEFAULT)]),
    )
    .unwrap();

    assert!(db.is_recursive_alias(a_def));
    assert!(db.is_recursive_alias(b_def));
    assert!(is_assignable(&db, a, b));
    assert!(is_assignable(&db, b, a));
    // The cycle does not make unrelated sources acceptable.
    assert!(!is_assignable(&db, a, TypeId::STRING));
}

#[test]
fn directly_cyclic_alias_pair_is_mutually_assignable() {
    let db = TypeInterner::new();
    // A resolves to B and B resolves to A, with no structure in between.
    let a_def = db.declare_alias("A");
    let b_def = db.declare_alias("B");
    let a = db.alias_type(a_def);
    let b = db.alias_type(b_def);
    db.resolve_alias(a_def, b).unwrap();
    db.resolve_alias(b_def, a).unwrap();
    assert!(db.is_recursive_alias(a_def));
    assert!(db.is_recursive_alias(b_def));
    assert!(is_assignable(&db, a, b));
    assert!(is_assignable(&db, b, a));
}

#[test]
fn alias_to_variant_resolves_through_step_order() {
    let db = TypeInterner::new();
    // The source alias must unwrap before variant handling; an alias
    // resolving to a variant would otherwise be compared arm-less.
    let nums_def = db.declare_alias("Numbers");
    let nums = db.alias_type(nums_def);
    db.resolve_alias(nums_def, db.variant(vec![TypeId::INTEGER, TypeId::FLOAT]))
        .unwrap();
    assert!(is_assignable(&db, TypeId::NUMERIC, nums));
    assert!(!is_assignable(&db, TypeId::INTEGER, nums));
    assert!(is_assignable(&db, nums, TypeId::INTEGER));
}

#[test]
fn unresolved_alias_is_never_assignable() {
    let db = TypeInterner::new();
    let pending = db.alias_type(db.declare_alias("Pending"));
    assert!(!is_assignable(&db, pending, TypeId::INTEGER));
    // Any still accepts it trivially; a concrete target does not.
    assert!(is_assignable(&db, TypeId::ANY, pending));
    assert!(!is_assignable(&db, TypeId::INTEGER, pending));
}

#[test]
fn data_alias_classifies_nested_data() {
    let db = TypeInterner::new();
    assert!(is_assignable(&db, TypeId::DATA, TypeId::STRING));
    assert!(is_assignable(&db, TypeId::DATA, TypeId::UNDEF));
    assert!(is_assignable(
        &db,
        TypeId::DATA,
        db.hash(TypeId::STRING, TypeId::DATA, SizeRange::DEFAULT)
    ));
    assert!(!is_assignable(&db, TypeId::DATA, TypeId::REGEXP));

    let nested = Value::hash_of([(
        Value::from("servers"),
        Value::array_of([Value::from(1), Value::from("web-1"), Value::Undef]),
    )]);
    assert!(is_instance(&db, TypeId::DATA, &nested));
    assert!(!is_instance(&db, TypeId::DATA, &Value::Regexp("x.*".into())));
}

#[test]
fn checker_can_be_reused_per_query() {
    let db = TypeInterner::new();
    let mut checker = AssignabilityChecker::new(&db);
    assert!(checker.is_assignable(TypeId::NUMERIC, TypeId::INTEGER));
    assert!(!checker.is_assignable(TypeId::INTEGER, TypeId::NUMERIC));
}
