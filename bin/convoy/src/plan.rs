//! The stock migration plan for the contract suite.

use convoy_migrate::{Arg, CallerSelector, MigrationRunner, Step};

/// The ordered migration plan:
///
/// 1. Deploy `Migrations` (run bookkeeping).
/// 2. Deploy `NodeContract`.
/// 3. Deploy `UserContract`, passing in NodeContract's freshly deployed
///    address.
/// 4. Connect the two contracts by calling `connector()` on UserContract
///    from the issuer's address (the first available identity).
///
/// The wiring call in step 4 is optional; with `skip_wiring` the issuer is
/// expected to call `connector()` manually after the migration.
pub fn standard_plan(skip_wiring: bool) -> MigrationRunner {
    let runner = MigrationRunner::new()
        .then(Step::deploy("Migrations", []))
        .then(Step::deploy("NodeContract", []))
        .then(Step::deploy(
            "UserContract",
            [Arg::address_of("NodeContract")],
        ));

    if skip_wiring {
        runner
    } else {
        runner.then(Step::call(
            "UserContract",
            "connector",
            [],
            CallerSelector::First,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_plan_ends_with_the_wiring_call() {
        assert_eq!(standard_plan(false).steps().len(), 4);
        assert_eq!(standard_plan(true).steps().len(), 3);
    }
}
