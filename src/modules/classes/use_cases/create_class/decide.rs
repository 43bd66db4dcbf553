use crate::modules::classes::core::class::NewClass;
use crate::modules::classes::use_cases::create_class::command::CreateClass;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecideError {
    #[error("class name is required")]
    MissingName,
}

pub fn decide_create(command: CreateClass) -> Result<NewClass, DecideError> {
    let name = command.name.trim();
    if name.is_empty() {
        return Err(DecideError::MissingName);
    }
    Ok(NewClass {
        user_id: command.user_id,
        name: name.to_string(),
        created_at: command.created_at,
    })
}

#[cfg(test)]
mod create_class_decide_tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    fn command(name: &str) -> CreateClass {
        CreateClass {
            user_id: 1,
            name: name.to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 6, 2, 8, 0, 0).unwrap(),
        }
    }

    #[rstest]
    fn it_should_trim_the_class_name() {
        let class = decide_create(command("  Linear Algebra ")).unwrap();
        assert_eq!(class.name, "Linear Algebra");
        assert_eq!(class.user_id, 1);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn it_should_reject_a_blank_name(#[case] name: &str) {
        assert_eq!(decide_create(command(name)), Err(DecideError::MissingName));
    }
}
