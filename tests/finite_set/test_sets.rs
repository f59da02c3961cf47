use finset_limits::prelude::*;
use std::collections::HashMap;

fn people() -> Tabular<&'static str> {
    Tabular::new(
        vec!["name".to_string(), "city".to_string()],
        vec![
            vec!["ada", "london"],
            vec!["alan", "manchester"],
            vec!["grace", "new york"],
        ],
    )
    .unwrap()
}

#[test]
fn range_enumerates_its_skeleton() {
    let r = Range(3);
    assert_eq!(r.elements(), vec![0, 1, 2]);
    assert_eq!(r.position(&2), Some(2));
    assert!(!r.contains(&3));
}

#[test]
fn collections_reject_duplicates() {
    let res = Collection::new(vec!["a", "b", "a"]);
    assert_eq!(res.unwrap_err(), Error::DuplicateElement { position: 2 });

    let c = Collection::new(vec!["x", "y"]).unwrap();
    assert_eq!(c.position(&"y"), Some(1));
    assert_eq!(c.get(0), Some("x"));
    assert_eq!(c.get(2), None);
}

#[test]
fn tabular_rows_must_match_columns() {
    let res = Tabular::new(vec!["a".to_string()], vec![vec![1], vec![2, 3]]);
    assert_eq!(
        res.unwrap_err(),
        Error::TypeMismatch {
            leg: 1,
            expected: 1,
            found: 2
        }
    );
}

#[test]
fn tabular_columns_project() {
    let t = people();
    assert_eq!(
        t.column("city").unwrap(),
        SemifiniteFunction::new(vec!["london", "manchester", "new york"])
    );
    assert_eq!(
        t.column("age"),
        Err(Error::UnknownColumn {
            name: "age".to_string()
        })
    );
    assert_eq!(
        t.named_row(1),
        Some(vec![("name", &"alan"), ("city", &"manchester")])
    );
    assert_eq!(t.position(&vec!["grace", "new york"]), Some(2));
}

#[test]
fn functions_from_maps() {
    let domain = Collection::new(vec!["a", "b", "c"]).unwrap();
    let codomain = Collection::new(vec![10, 20]).unwrap();

    let map: HashMap<_, _> = [("a", 20), ("b", 10), ("c", 20)].into_iter().collect();
    let f = FiniteFunction::from_map(&domain, &codomain, &map).unwrap();
    assert_eq!(f.table().as_slice(), &[1, 0, 1]);
    assert_eq!(f.target(), 2);

    let partial: HashMap<_, _> = [("a", 20), ("c", 20)].into_iter().collect();
    assert_eq!(
        FiniteFunction::from_map(&domain, &codomain, &partial),
        Err(Error::Domain { element: 1, size: 3 })
    );

    let outside: HashMap<_, _> = [("a", 20), ("b", 30), ("c", 20)].into_iter().collect();
    assert_eq!(
        FiniteFunction::from_map(&domain, &codomain, &outside),
        Err(Error::NotAnElement { position: 1 })
    );
}

#[test]
fn functions_from_values() {
    let codomain = Collection::new(vec!['p', 'q', 'r']).unwrap();
    let f = FiniteFunction::from_values(&['r', 'p'], &codomain).unwrap();
    assert_eq!(f.table().as_slice(), &[2, 0]);
    assert!(FiniteFunction::from_values(&['z'], &codomain).is_err());
}

#[test]
fn var_sets_contain_only_variables() {
    let vars = VarSet::<i32>::new(2);
    assert_eq!(vars.len(), 2);
    assert_eq!(vars.elements(), vec![AttrVal::var(0), AttrVal::var(1)]);
    assert!(!vars.contains(&AttrVal::Value(0)));
    assert!(!vars.contains(&AttrVal::var(2)));
}
