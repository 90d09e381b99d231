use symcas::{Expr, MathFunction, abs, add, apply, div, mul, neg, pow, root, sub, sum};

fn var(name: &str) -> Expr {
    Expr::variable(name).expect("variable")
}

fn n(value: i64) -> Expr {
    Expr::number(value)
}

fn expect_rendered(expr: symcas::Result<Expr>, expected: &str) {
    let expr = expr.expect("construct expression");
    assert_eq!(expr.to_string(), expected, "rendering mismatch for {expr:?}");
}

#[test]
fn constants_and_leaves() {
    expect_rendered(Ok(n(42)), "42");
    expect_rendered(Ok(n(-7)), "-7");
    expect_rendered(Ok(var("x")), "x");
    expect_rendered(Ok(Expr::pi()), "π");
    expect_rendered(div(n(6), n(4)), "3∕2");
    expect_rendered(Expr::fraction(-3, 2), "-3∕2");
}

#[test]
fn roots_use_glyphs_for_small_degrees() {
    let x = var("x");
    expect_rendered(root(n(8), n(3)), "∛8");
    expect_rendered(root(n(7), n(2)), "√7");
    expect_rendered(root(n(12), n(2)), "2×√3");
    expect_rendered(root(n(5), n(4)), "∜5");
    expect_rendered(root(x.clone(), n(2)), "√x");
    expect_rendered(root(add(x.clone(), n(1)).unwrap(), n(2)), "√(1+x)");
    expect_rendered(root(n(-4), n(2)), "√(-4)");
    expect_rendered(root(neg(x.clone()).unwrap(), n(2)), "√(-x)");
    expect_rendered(root(x.clone(), n(5)), "root(x, 5)");
    expect_rendered(root(x, var("k")), "root(x, k)");
}

#[test]
fn parentheses_follow_precedence() {
    let (x, y, z) = (var("x"), var("y"), var("z"));
    let cases = vec![
        (add(x.clone(), n(2)), "2+x"),
        (pow(add(x.clone(), n(1)).unwrap(), n(2)), "(1+x)^2"),
        (pow(x.clone(), n(-2)), "x^(-2)"),
        (pow(n(-2), x.clone()), "(-2)^x"),
        (sub(x.clone(), add(y.clone(), z.clone()).unwrap()), "x-(y+z)"),
        (sub(add(x.clone(), y.clone()).unwrap(), z.clone()), "x+y-z"),
        (div(x.clone(), mul(y.clone(), z.clone()).unwrap()), "x∕(y×z)"),
        (div(mul(y.clone(), z.clone()).unwrap(), x.clone()), "y×z∕x"),
        (mul(add(x.clone(), n(1)).unwrap(), y.clone()), "y×(1+x)"),
        (neg(add(x.clone(), y.clone()).unwrap()), "-(x+y)"),
        (neg(pow(x.clone(), n(2)).unwrap()), "-x^2"),
        (neg(mul(x.clone(), y.clone()).unwrap()), "-(x×y)"),
        (mul(Expr::fraction(1, 2).unwrap(), x.clone()), "1∕2×x"),
        (pow(Expr::fraction(1, 2).unwrap(), x.clone()), "(1∕2)^x"),
        (mul(Expr::pi(), x.clone()), "π×x"),
    ];
    for (expr, expected) in cases {
        expect_rendered(expr, expected);
    }
}

#[test]
fn negative_terms_print_as_subtraction() {
    let (x, y, z) = (var("x"), var("y"), var("z"));
    expect_rendered(add(x.clone(), neg(y.clone()).unwrap()), "x-y");
    expect_rendered(add(x.clone(), mul(n(-2), y.clone()).unwrap()), "x-2×y");
    expect_rendered(add(neg(x.clone()).unwrap(), neg(y.clone()).unwrap()), "-x-y");
    expect_rendered(
        add(x.clone(), neg(add(y.clone(), z.clone()).unwrap()).unwrap()),
        "x-(y+z)",
    );
    expect_rendered(sum([z, y, x, n(3)]), "3+x+y+z");
}

#[test]
fn subtracting_negatives_prints_as_addition() {
    let (x, y) = (var("x"), var("y"));
    expect_rendered(sub(x.clone(), n(-3)), "3+x");
    expect_rendered(sub(x.clone(), mul(n(-2), y.clone()).unwrap()), "x+2×y");
    expect_rendered(sub(x.clone(), Expr::fraction(-1, 2).unwrap()), "1∕2+x");
    expect_rendered(sub(x, n(i64::MIN)), "x-(-9223372036854775808)");
}

#[test]
fn negated_divisors_move_the_sign_out() {
    let (x, y) = (var("x"), var("y"));
    expect_rendered(div(x.clone(), neg(y.clone()).unwrap()), "-(x∕y)");
    expect_rendered(div(neg(x.clone()).unwrap(), y.clone()), "-(x∕y)");
    expect_rendered(pow(x, neg(y).unwrap()), "x^(-y)");
}

#[test]
fn unrepresentable_opposites_keep_their_sign_in_parentheses() {
    let (x, y) = (var("x"), var("y"));
    let term = mul(n(i64::MIN), y).unwrap();
    expect_rendered(add(x, term), "x+(-9223372036854775808×y)");
}

#[test]
fn functions_and_absolute_values() {
    let x = var("x");
    expect_rendered(apply(MathFunction::Ln, x.clone()), "ln(x)");
    expect_rendered(apply(MathFunction::Sin, add(x.clone(), n(1)).unwrap()), "sin(1+x)");
    expect_rendered(abs(neg(x.clone()).unwrap()), "|x|");
    expect_rendered(pow(abs(x).unwrap(), n(3)), "|x|^3");
}
