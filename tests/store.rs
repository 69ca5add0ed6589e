//! Scenario tests for the constraint store: sentinels, assumptions,
//! solution enumeration, budgets and the width-reconciliation rules.
use bitblast::*;

#[test]
fn xor_of_a_and_not_b_has_exactly_two_solutions() {
    let mut m = Model::<SimpleEngine>::default();
    let a = m.new_variable();
    let b = m.new_variable();
    let nb = m.not(b);
    let parity = m.xor(a, nb);
    m.assert_unit(parity).unwrap();
    let mut solutions = Vec::new();
    while m.solve() == Satisfiability::Sat {
        let pair = (m.value_of(a).unwrap(), m.value_of(b).unwrap());
        solutions.push(pair);
        let blocker = m.negate_solution(&[a, b]).unwrap();
        m.assert_unit(blocker).unwrap();
    }
    solutions.sort_unstable();
    // a XOR NOT b holds exactly when a == b
    assert_eq!(solutions, vec![(false, false), (true, true)]);
}

#[test]
fn assumptions_steer_without_committing() {
    let mut m = Model::<SimpleEngine>::default();
    let a = m.vector(3);
    let small = a.lt(&mut m, 4).unwrap();
    m.assert_unit(small).unwrap();
    let odd = a.odd();
    let Bit::Lit(odd) = odd else {
        panic!("fresh vector bits are symbolic")
    };
    m.assume(odd).unwrap();
    assert_eq!(m.solve(), Satisfiability::Sat);
    assert!(a.value_of(&m).unwrap() % 2 == 1);
    m.unassume(odd);
    m.assume(!odd).unwrap();
    assert_eq!(m.solve(), Satisfiability::Sat);
    assert!(a.value_of(&m).unwrap() % 2 == 0);
}

#[test]
fn failed_operations_leave_the_store_untouched() {
    let mut m = Model::<SimpleEngine>::default();
    let a = m.vector(4);
    let b = m.vector(7);
    let vars = m.num_vars();
    let clauses = m.num_clauses();
    let gates = m.num_gates();
    assert_eq!(
        a.add(&mut m, &b).unwrap_err(),
        ModelError::SizeMismatch(4, 7)
    );
    assert_eq!(
        a.mul(&mut m, 100).unwrap_err(),
        ModelError::WidthExceeded(7, 4)
    );
    assert_eq!(
        a.divmod(&mut m, &b).unwrap_err(),
        ModelError::SizeMismatch(4, 7)
    );
    assert_eq!(m.num_vars(), vars);
    assert_eq!(m.num_clauses(), clauses);
    assert_eq!(m.num_gates(), gates);
}

#[test]
fn elastic_integers_meet_fixed_widths() {
    let mut m = Model::<SimpleEngine>::default();
    let a = m.vector(4);
    // 3 widens to 0011
    let masked = a.and(&mut m, 3).unwrap();
    assert_eq!(masked.slice(0..2), Vector::from_int_width(0, 2).unwrap());
    let is_three = a.eq(&mut m, 3).unwrap();
    m.assert_unit(is_three).unwrap();
    assert_eq!(m.solve(), Satisfiability::Sat);
    assert_eq!(masked.value_of(&m), Ok(3));
}

#[test]
fn gate_cache_spans_call_sites() {
    let mut m = Model::<SimpleEngine>::default();
    let a = m.vector(4);
    let b = m.vector(4);
    let x = a.xor(&mut m, &b).unwrap();
    let gates = m.num_gates();
    assert_eq!(gates, 4);
    // the same operand pairs come back from the cache
    let y = b.xor(&mut m, &a).unwrap();
    assert_eq!(x, y);
    assert_eq!(m.num_gates(), gates);
    // ne negates the left operands: four fresh xors plus the and-chain
    let _ = a.ne(&mut m, &b).unwrap();
    assert_eq!(m.num_gates(), gates + 7);
    // repeating it is free
    let _ = a.ne(&mut m, &b).unwrap();
    assert_eq!(m.num_gates(), gates + 7);
}

#[test]
fn encoded_gates_agree_with_their_truth_tables() {
    // rows indexed by (a, b) as (false,false), (false,true), ...
    let tables = [
        (GateOp::And, [false, false, false, true]),
        (GateOp::Nand, [true, true, true, false]),
        (GateOp::Or, [false, true, true, true]),
        (GateOp::Nor, [true, false, false, false]),
        (GateOp::Xor, [false, true, true, false]),
    ];
    for (op, table) in tables {
        for (row, expected) in table.iter().enumerate() {
            let (x, y) = (row & 2 != 0, row & 1 != 0);
            let mut m = Model::<SimpleEngine>::default();
            let a = m.new_variable();
            let b = m.new_variable();
            let out = m.gate(op, a, b);
            m.assert_unit(if x { a } else { !a }).unwrap();
            m.assert_unit(if y { b } else { !b }).unwrap();
            assert_eq!(m.solve(), Satisfiability::Sat, "{op:?}({x}, {y})");
            assert_eq!(m.value_of(out), Some(*expected), "{op:?}({x}, {y})");
            // the clauses must pin the output, not merely admit it
            m.assert_unit(if *expected { !out } else { out }).unwrap();
            assert_eq!(m.solve(), Satisfiability::Unsat, "{op:?}({x}, {y})");
        }
    }
}

#[test]
fn budgets_turn_backtracking_into_unknown() {
    let mut m = Model::<SimpleEngine>::default();
    let a = m.new_variable();
    let b = m.new_variable();
    // a is decided first (lowest index, true first) and propagates b
    // both ways, so the first conflict is unavoidable; flipping a to
    // false satisfies everything
    m.assert_clause(&[Bit::Lit(!a), Bit::Lit(b)]);
    m.assert_clause(&[Bit::Lit(!a), Bit::Lit(!b)]);
    let strangled = SolveLimits {
        conflicts: Some(0),
        ..SolveLimits::default()
    };
    assert_eq!(m.solve_with(&strangled), Satisfiability::Unknown);
    assert_eq!(m.value_of(a), None);
    // and the same instance resolves without the budget
    assert_eq!(m.solve(), Satisfiability::Sat);
    assert_eq!(m.value_of(a), Some(false));
}

#[test]
fn raw_dimacs_style_literals_round_trip() {
    let mut m = Model::<SimpleEngine>::default();
    let a = m.new_variable();
    let b = m.new_variable();
    let clause = vec![i32::from(a), -i32::from(b)];
    let lifted = clause
        .iter()
        .map(|raw| m.lit(*raw).map(Bit::from))
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    m.assert_clause(&lifted);
    m.assume(b).unwrap();
    assert_eq!(m.solve(), Satisfiability::Sat);
    assert_eq!(m.value_of(a), Some(true));
    assert_eq!(m.lit(99), Err(ModelError::UnknownIdentifier(99)));
}
