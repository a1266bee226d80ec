//! Roster inspection CLI.
//!
//! # Responsibility
//! - Verify `roster_core` linkage when run without arguments.
//! - Print or enroll against the database named by `ROSTER_DB_PATH`.

use roster_core::db::open_db;
use roster_core::{init_logging, RosterConfig, RosterService, SqliteStorage};
use std::error::Error;
use std::process::ExitCode;

const USAGE: &str = "usage: roster_cli [list | enroll <member_id> <course_id>]";

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<(), Box<dyn Error>> {
    let Some(command) = args.first() else {
        println!("roster_core ping={}", roster_core::ping());
        println!("roster_core version={}", roster_core::core_version());
        return Ok(());
    };

    let config = RosterConfig::from_env()?;
    if let Some(log_dir) = &config.log_dir {
        init_logging(config.log_level, log_dir)?;
    }

    let conn = open_db(&config.db_path)?;
    let mut roster = RosterService::open(SqliteStorage::try_new(&conn)?)?;

    match (command.as_str(), &args[1..]) {
        ("list", []) => {
            for member in roster.list_members() {
                println!(
                    "member id={} username={} courses={:?}",
                    member.id, member.username, member.courses
                );
            }
            for course in roster.list_courses() {
                println!(
                    "course id={} name={} start_date={} participants={:?}",
                    course.id, course.name, course.start_date, course.participants
                );
            }
            Ok(())
        }
        ("enroll", [member_id, course_id]) => {
            let outcome = roster.enroll(member_id.parse()?, course_id.parse()?)?;
            println!(
                "enroll member_side={} course_side={}",
                outcome.member.as_str(),
                outcome.course.as_str()
            );
            if !outcome.is_linked() {
                log::warn!("event=cli_enroll module=cli status=partial");
            }
            Ok(())
        }
        _ => Err(USAGE.into()),
    }
}
