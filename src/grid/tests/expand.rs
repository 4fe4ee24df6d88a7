use crate::grid::expand::expand;
use crate::grid::tests::utils::grouped;

fn columns(days: &str) -> Vec<usize> {
    let group = grouped("100", "8:00AM - 8:50AM", days);
    expand(&group).map(|(_, day)| day.column()).collect()
}

#[test]
fn test_mwf_expands_to_three_columns() {
    assert_eq!(vec![0, 2, 4], columns("MWF"));
}

#[test]
fn test_tr_expands_to_two_columns() {
    assert_eq!(vec![1, 3], columns("TR"));
}

#[test]
fn test_unrecognized_code_expands_to_nothing() {
    assert!(columns("Z").is_empty());
    assert!(columns("").is_empty());
}

#[test]
fn test_expansion_keeps_the_group() {
    let group = grouped("100", "8:00AM - 8:50AM", "FM");
    let instances = expand(&group).collect::<Vec<_>>();

    assert_eq!(2, instances.len());
    assert!(instances.iter().all(|(g, _)| *g == &group));
}
