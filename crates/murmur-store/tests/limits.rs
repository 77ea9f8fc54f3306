use murmur_store::messages::effective_limit;

#[test]
fn absent_limit_defaults_to_50() {
    assert_eq!(effective_limit(None), 50);
}

#[test]
fn in_range_limits_pass_through_floored() {
    assert_eq!(effective_limit(Some(1.0)), 1);
    assert_eq!(effective_limit(Some(25.9)), 25);
    assert_eq!(effective_limit(Some(200.0)), 200);
}

#[test]
fn out_of_range_limits_clamp() {
    assert_eq!(effective_limit(Some(0.0)), 1);
    assert_eq!(effective_limit(Some(-10.0)), 1);
    assert_eq!(effective_limit(Some(0.4)), 1);
    assert_eq!(effective_limit(Some(201.0)), 200);
    assert_eq!(effective_limit(Some(1e9)), 200);
}

#[test]
fn nan_limit_clamps_to_minimum() {
    assert_eq!(effective_limit(Some(f64::NAN)), 1);
}
