use madcmd::MadError;
use madcmd::command::{Command, assemble};
use madcmd::value::{Arg, Kwargs, Operator, Range, Value};

#[test]
fn false_flag_is_negated() {
    let kwargs: Kwargs = [("echo", false)].into_iter().collect();
    assert_eq!(assemble("option", &[], &kwargs).unwrap(), "option, -echo;\n");
}

#[test]
fn keyword_arguments_follow_positional_in_key_order() {
    let args = vec![Arg::equals("sequence", "lhc"), Arg::flag("centre")];
    let kwargs: Kwargs = [("dx", 2), ("betx", 3), ("bety", 8)].into_iter().collect();
    assert_eq!(
        assemble("twiss", &args, &kwargs).unwrap(),
        "twiss, sequence=lhc, centre, betx=3, bety=8, dx=2;\n"
    );
}

#[test]
fn keyword_insertion_order_does_not_matter() {
    let a = Command::new("twiss").kwarg("dx", 2).kwarg("betx", 3).kwarg("bety", 8);
    let b = Command::new("twiss").kwarg("bety", 8).kwarg("dx", 2).kwarg("betx", 3);
    assert_eq!(a.render().unwrap(), b.render().unwrap());
}

#[test]
fn relational_and_free_form_arguments() {
    let args = vec![Arg::relational("betx", Operator::Less, 3.13), Arg::flag("bety < 3.5")];
    assert_eq!(
        assemble("constraint", &args, &Kwargs::new()).unwrap(),
        "constraint, betx<3.13, bety < 3.5;\n"
    );
}

#[test]
fn flag_keyword_set_to_true_renders_bare() {
    let kwargs: Kwargs = [("betx<3.13", true)].into_iter().collect();
    assert_eq!(assemble("constraint", &[], &kwargs).unwrap(), "constraint, betx<3.13;\n");
}

#[test]
fn booleans_never_take_the_generic_path() {
    let args = vec![Arg::relational("chrom", Operator::Deferred, true), Arg::equals("echo", false)];
    assert_eq!(assemble("twiss", &args, &Kwargs::new()).unwrap(), "twiss, chrom, -echo;\n");
}

#[test]
fn range_key_is_case_insensitive() {
    let cmd = Command::new("twiss")
        .arg(("RANGE", Range::span("IP1", "IP2")))
        .kwarg("range", "IP5");
    assert_eq!(cmd.render().unwrap(), "twiss, range=IP1/IP2, range=IP5;\n");
}

#[test]
fn other_keys_keep_their_case() {
    let cmd = Command::new("select").arg(("Flag", "twiss")).kwarg("Column", "name");
    assert_eq!(cmd.render().unwrap(), "select, Flag=twiss, Column=name;\n");
}

#[test]
fn range_key_rejects_non_range_values() {
    let err = Command::new("twiss").kwarg("range", 3).render().unwrap_err();
    assert!(matches!(err, MadError::InvalidRange(_)));
    let err = Command::new("twiss").arg("range").render().unwrap_err();
    assert!(matches!(err, MadError::InvalidRange(_)));
}

#[test]
fn non_finite_numbers_are_rejected() {
    let err = Command::new("match").kwarg("tol", f64::INFINITY).render().unwrap_err();
    assert!(format!("{err}").contains("tol"));
}

#[test]
fn command_without_arguments_is_terminated() {
    assert_eq!(Command::new("stop").render().unwrap(), "stop;\n");
}

#[test]
fn later_keyword_overwrites_earlier() {
    let cmd = Command::new("beam").kwarg("energy", 450).kwarg("energy", 6800.0);
    assert_eq!(cmd.kwargs().get("energy"), Some(&Value::Float(6800.0)));
    assert_eq!(cmd.render().unwrap(), "beam, energy=6800.0;\n");
}
