use super::*;
use pretty_assertions::assert_eq;

#[test]
fn source_idents_are_deduplicated() {
    let src = b"foo bar foo";
    let mut pool = LiteralPool::new();
    let a = pool.intern_source(CharKind::Ident, &src[0..3]).unwrap();
    let b = pool.intern_source(CharKind::Ident, &src[4..7]).unwrap();
    let c = pool.intern_source(CharKind::Ident, &src[8..11]).unwrap();
    assert_eq!(a, c);
    assert_ne!(a, b);
    assert_eq!(pool.len(), 2);
    let entry = pool.get(a).unwrap();
    assert!(entry.flags.contains(LiteralFlags::SOURCE_PTR));
    assert_eq!(entry.chars(), Some(&b"foo"[..]));
}

#[test]
fn decoded_and_source_entries_share_an_index() {
    let mut pool = LiteralPool::new();
    let decoded = pool.intern_decoded(CharKind::Ident, b"abc").unwrap();
    let source = pool.intern_source(CharKind::Ident, b"abc").unwrap();
    assert_eq!(decoded, source);
    assert!(!pool.get(decoded).unwrap().flags.contains(LiteralFlags::SOURCE_PTR));
}

#[test]
fn ident_and_string_do_not_merge() {
    let mut pool = LiteralPool::new();
    let ident = pool.intern_source(CharKind::Ident, b"x").unwrap();
    let string = pool.intern_source(CharKind::String, b"x").unwrap();
    assert_ne!(ident, string);
    assert_eq!(pool.get(ident).unwrap().kind(), LiteralKind::Ident);
    assert_eq!(pool.get(string).unwrap().kind(), LiteralKind::String);
}

#[test]
fn reuse_clears_unused_ident() {
    let mut pool = LiteralPool::new();
    let index = pool.intern_source(CharKind::Ident, b"x").unwrap();
    pool.mark_unused(index);
    assert!(pool.get(index).unwrap().flags.contains(LiteralFlags::UNUSED_IDENT));
    pool.intern_source(CharKind::Ident, b"x").unwrap();
    assert!(!pool.get(index).unwrap().flags.contains(LiteralFlags::UNUSED_IDENT));
}

#[test]
fn empty_string_is_source_backed() {
    let mut pool = LiteralPool::new();
    let index = pool.intern_decoded(CharKind::String, b"").unwrap();
    let entry = pool.get(index).unwrap();
    assert_eq!(entry.length(), 0);
    assert!(entry.flags.contains(LiteralFlags::SOURCE_PTR));
}

#[test]
fn numbers_are_never_merged() {
    let mut pool = LiteralPool::new();
    let a = pool.push_number(1000.0, 4).unwrap();
    let b = pool.push_number(1000.0, 4).unwrap();
    assert_ne!(a, b);
    assert_eq!(pool.get(a).unwrap().length(), 4);
}

#[test]
fn small_ints_are_merged_by_value() {
    let mut pool = LiteralPool::new();
    let a = pool.intern_small_int(5).unwrap();
    let b = pool.intern_small_int(-5).unwrap();
    let c = pool.intern_small_int(5).unwrap();
    assert_eq!(a, c);
    assert_ne!(a, b);
    let entry = pool.get(a).unwrap();
    assert_eq!(entry.kind(), LiteralKind::Number);
    assert_eq!(entry.length(), 0);
}

#[test]
fn function_slot_keeps_its_index() {
    let mut pool = LiteralPool::new();
    pool.intern_source(CharKind::Ident, b"f").unwrap();
    let slot = pool.reserve_function().unwrap();
    pool.intern_source(CharKind::Ident, b"g").unwrap();
    assert_eq!(pool.get(slot).unwrap().kind(), LiteralKind::Unused);

    assert!(pool.set_function(slot, CompiledCode::default()));
    assert_eq!(pool.get(slot).unwrap().kind(), LiteralKind::Function);
    // Only unused slots can be filled.
    assert!(!pool.set_function(slot, CompiledCode::default()));
    assert!(!pool.set_function(LiteralIndex::new(0), CompiledCode::default()));
}

#[test]
fn regexp_entries() {
    let mut pool = LiteralPool::new();
    let flags = RegexpFlags::GLOBAL | RegexpFlags::MULTILINE;
    let index = pool.push_regexp(b"/a+/gm", flags).unwrap();
    let entry = pool.get(index).unwrap();
    assert_eq!(entry.kind(), LiteralKind::Regexp);
    assert_eq!(
        entry.value,
        LiteralValue::Regexp {
            pattern: b"/a+/gm",
            flags
        }
    );
    assert_eq!(RegexpFlags::from_letter(b'i'), Some(RegexpFlags::IGNORE_CASE));
    assert_eq!(RegexpFlags::from_letter(b'y'), None);
}

#[test]
fn limit_is_enforced_for_every_kind() {
    let mut pool = LiteralPool::with_limit(2);
    pool.intern_source(CharKind::Ident, b"a").unwrap();
    pool.push_number(1.5, 3).unwrap();
    assert_eq!(
        pool.intern_source(CharKind::Ident, b"b"),
        Err(PoolError::LimitReached)
    );
    assert_eq!(pool.intern_small_int(7), Err(PoolError::LimitReached));
    assert_eq!(pool.reserve_function(), Err(PoolError::LimitReached));
    assert_eq!(
        pool.push_regexp(b"/x/", RegexpFlags::empty()),
        Err(PoolError::LimitReached)
    );
    // Lookups of existing entries still succeed at the limit.
    assert!(pool.intern_source(CharKind::Ident, b"a").is_ok());
}

#[test]
fn default_limit_matches_full_encoding() {
    let mut pool = LiteralPool::new();
    for i in 0..MAX_LITERALS {
        let index = pool.push_number(0.5, 3).unwrap();
        assert_eq!(index.as_usize(), i);
    }
    assert_eq!(pool.push_number(0.5, 3), Err(PoolError::LimitReached));
}

#[test]
fn iter_yields_append_order() {
    let mut pool = LiteralPool::new();
    pool.intern_source(CharKind::Ident, b"a").unwrap();
    pool.intern_source(CharKind::String, b"b").unwrap();
    let kinds: Vec<_> = pool.iter().map(|(i, l)| (i.raw(), l.kind())).collect();
    assert_eq!(kinds, vec![(0, LiteralKind::Ident), (1, LiteralKind::String)]);
}
