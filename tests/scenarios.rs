use tape_machine::{
    parse, MachineError, MissingTransition, RunOutcome, StepResult, Symbol, TapeMachine,
    TransitionTable,
};

fn table(text: &str) -> TransitionTable {
    parse(text).unwrap().into_iter().collect()
}

fn tape(symbols: &str) -> Vec<Symbol> {
    symbols.chars().map(String::from).collect()
}

#[test]
fn halting_scenario_traces_every_step() {
    let table = table("q1 1 0 R q2, q2 0 1 R q1, q2 b b H halt");
    let mut machine = TapeMachine::new(&table, tape("101b"), "q1");

    let mut trace = Vec::new();
    let outcome = machine.run_with(10, |snapshot| {
        trace.push((
            snapshot.state.to_string(),
            snapshot.tape.concat(),
            snapshot.head,
        ))
    });

    assert_eq!(outcome, RunOutcome::Halted);
    assert_eq!(
        trace,
        vec![
            ("q2".to_string(), "001b".to_string(), 1),
            ("q1".to_string(), "011b".to_string(), 2),
            ("q2".to_string(), "010b".to_string(), 3),
            ("q2".to_string(), "010b".to_string(), 3),
        ]
    );
    assert_eq!(machine.step_count(), 4);
    assert_eq!(machine.head(), 3);
    assert_eq!(machine.tape(), ["0", "1", "0", "b"]);
}

#[test]
fn missing_transition_on_first_step() {
    let table = table("q1 1 0 R q2");
    let mut machine = TapeMachine::new(&table, ["0"], "q1");

    let expected = MissingTransition {
        state: "q1".to_string(),
        symbol: "0".to_string(),
    };
    assert_eq!(machine.step(), Err(expected.clone()));

    machine.reset();
    assert_eq!(machine.run(10), RunOutcome::Failed(expected.clone()));
    assert_eq!(
        machine.run(10).into_result(machine.step_count()),
        Err(MachineError::MissingTransition(expected))
    );
}

#[test]
fn step_limit_after_exactly_five_steps() {
    let table = table("q1 b 1 R q2, q2 b 0 R q1");
    let mut machine = TapeMachine::new(&table, Vec::<Symbol>::new(), "q1");

    let mut observed = 0;
    let outcome = machine.run_with(5, |_| observed += 1);

    assert_eq!(outcome, RunOutcome::StepLimitExceeded);
    assert_eq!(observed, 5);
    assert_eq!(machine.step_count(), 5);
    assert_eq!(machine.tape().concat(), "10101");
    assert_eq!(machine.head(), 5);
}

#[test]
fn machine_starting_in_unknown_state_fails_on_first_step() {
    let table = TransitionTable::default();
    let mut machine = TapeMachine::new(&table, tape("1"), "nowhere");

    let error = machine.step().unwrap_err();
    assert_eq!(error.state, "nowhere");
    assert_eq!(error.symbol, "1");
}

#[test]
fn halted_machine_can_be_stepped_again() {
    let table = table("q1 1 1 H q1");
    let mut machine = TapeMachine::new(&table, tape("1"), "q1");

    assert_eq!(machine.step(), Ok(StepResult::Halted));
    assert_eq!(machine.step(), Ok(StepResult::Halted));
    assert_eq!(machine.step_count(), 2);
}

#[test]
fn shared_table_runs_on_many_threads() {
    let table = table(
        "right 0 0 R right, right 1 1 R right, right b b L carry,
         carry 1 0 L carry, carry 0 1 H done, carry b 1 H done",
    );

    let results: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = ["0", "1", "10", "11", "111"]
            .into_iter()
            .map(|input| {
                let table = &table;
                scope.spawn(move || {
                    let mut machine = TapeMachine::new(table, tape(input), "right");
                    assert_eq!(machine.run(100), RunOutcome::Halted);
                    machine
                        .tape()
                        .iter()
                        .filter(|s| s.as_str() != machine.blank())
                        .cloned()
                        .collect::<String>()
                })
            })
            .collect();

        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results, vec!["1", "10", "11", "100", "1000"]);
}
