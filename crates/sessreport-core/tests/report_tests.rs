use std::collections::BTreeSet;
use std::fs;

use sessreport_core::{process, render, Pipeline, ReportError};
use sessreport_logging::Logger;
use sessreport_records::{RecordError, UserRegistry};
use tempfile::TempDir;

const SAMPLE: &str = "user,1,John,Smith,25
session,1,1,Chrome,10,2016-10-01
session,1,2,Internet Explorer,20,2016-09-01
user,2,Jane,Doe,30
session,2,3,Firefox,15,2016-10-02
";

const SAMPLE_REPORT: &str = concat!(
    r#"{"totalUsers":2,"uniqueBrowsersCount":3,"totalSessions":3,"#,
    r#""allBrowsers":"CHROME,FIREFOX,INTERNET EXPLORER","usersStats":{"#,
    r#""John Smith":{"sessionsCount":2,"totalTime":"30 min.","longestSession":"20 min.","#,
    r#""browsers":"CHROME, INTERNET EXPLORER","usedIE":true,"alwaysUsedChrome":false,"#,
    r#""dates":["2016-10-01","2016-09-01"]},"#,
    r#""Jane Doe":{"sessionsCount":1,"totalTime":"15 min.","longestSession":"15 min.","#,
    r#""browsers":"FIREFOX","usedIE":false,"alwaysUsedChrome":true,"#,
    r#""dates":["2016-10-02"]}}}"#,
    "\n"
);

/// A larger fixture with several users and mixed browsers.
const LARGE: &str = "user,0,Leida,Cira,0
session,0,0,Safari 29,87,2016-10-23
session,0,1,Firefox 12,118,2017-02-27
session,0,2,Internet Explorer 28,31,2017-03-28
session,0,3,Internet Explorer 28,109,2016-09-15
session,0,4,Safari 39,104,2017-09-27
session,0,5,Internet Explorer 35,6,2016-09-01
user,1,Palmer,Katrina,65
session,1,0,Safari 17,12,2016-10-21
session,1,1,Firefox 32,3,2016-12-20
session,1,2,Chrome 6,59,2016-11-11
session,1,3,Internet Explorer 10,28,2017-04-29
session,1,4,Chrome 13,116,2016-12-28
user,2,Gregory,Santos,86
session,2,0,Chrome 35,6,2018-09-21
session,2,1,Safari 49,85,2017-05-22
session,2,2,Firefox 47,17,2018-02-02
session,2,3,Chrome 20,84,2016-11-25
";

fn run(text: &str) -> Result<String, ReportError> {
    let report = process(text, &Logger::quiet())?;
    render(&report)
}

// ============================================================
// End-to-end
// ============================================================

#[test]
fn test_sample_report_matches_golden_output() {
    assert_eq!(run(SAMPLE).unwrap(), SAMPLE_REPORT);
}

#[test]
fn test_large_fixture_user_stats() {
    let report = process(LARGE, &Logger::quiet()).unwrap();

    assert_eq!(report.global.total_users, 3);
    assert_eq!(report.global.total_sessions, 15);
    assert_eq!(report.global.unique_browsers_count, 14);

    let leida = report.users_stats.get("Leida Cira").unwrap();
    assert_eq!(leida.sessions_count, 6);
    assert_eq!(leida.total_time, "455 min.");
    assert_eq!(leida.longest_session, "118 min.");
    assert_eq!(
        leida.browsers,
        "FIREFOX 12, INTERNET EXPLORER 28, INTERNET EXPLORER 28, INTERNET EXPLORER 35, SAFARI 29, SAFARI 39"
    );
    assert!(leida.used_ie);
    assert!(!leida.always_used_chrome);
    assert_eq!(
        leida.dates,
        vec![
            "2017-09-27",
            "2017-03-28",
            "2017-02-27",
            "2016-10-23",
            "2016-09-15",
            "2016-09-01"
        ]
    );

    let gregory = report.users_stats.get("Gregory Santos").unwrap();
    assert!(!gregory.used_ie);
    assert!(!gregory.always_used_chrome);
    assert_eq!(gregory.total_time, "192 min.");
}

#[test]
fn test_pipeline_is_idempotent() {
    let first = run(LARGE).unwrap();
    let second = run(LARGE).unwrap();
    assert_eq!(first, second);
}

// ============================================================
// Aggregate properties
// ============================================================

#[test]
fn test_total_sessions_matches_user_counts() {
    for input in [SAMPLE, LARGE] {
        let population = UserRegistry::from_text(input).unwrap();
        let report = process(input, &Logger::quiet()).unwrap();

        let per_user: usize = report.users_stats.iter().map(|(_, s)| s.sessions_count).sum();
        assert_eq!(report.global.total_sessions, per_user);
        assert_eq!(report.global.total_sessions, population.global_sessions().len());
    }
}

#[test]
fn test_dates_align_with_session_counts_and_descend() {
    let report = process(LARGE, &Logger::quiet()).unwrap();
    for (_, stats) in report.users_stats.iter() {
        assert_eq!(stats.dates.len(), stats.sessions_count);
        assert!(stats.dates.windows(2).all(|w| w[0] >= w[1]));
    }
}

#[test]
fn test_unique_browsers_count_is_case_sensitive() {
    let input = "user,1,Ann,Bee,20
session,1,1,Chrome,5,2017-01-01
session,1,2,chrome,5,2017-01-02
session,1,3,Firefox,5,2017-01-03
";
    let population = UserRegistry::from_text(input).unwrap();
    let report = process(input, &Logger::quiet()).unwrap();

    let uppercased: BTreeSet<String> = population
        .sessions()
        .map(|s| s.browser.to_uppercase())
        .collect();
    assert_eq!(uppercased.len(), 2);
    assert_eq!(report.global.unique_browsers_count, 3);
    assert_eq!(report.global.all_browsers, "CHROME,FIREFOX,CHROME");
}

#[test]
fn test_user_without_sessions() {
    let input = "user,1,Empty,User,33\nuser,2,Busy,User,44\nsession,2,1,Opera,7,2017-05-05\n";
    let report = process(input, &Logger::quiet()).unwrap();

    let empty = report.users_stats.get("Empty User").unwrap();
    assert_eq!(empty.sessions_count, 0);
    assert_eq!(empty.total_time, "0 min.");
    assert_eq!(empty.longest_session, " min.");
    assert_eq!(empty.browsers, "");
    assert!(!empty.used_ie);
    assert!(empty.always_used_chrome);
    assert!(empty.dates.is_empty());
}

#[test]
fn test_full_name_collision_keeps_later_user_at_first_position() {
    let input = "user,1,Sam,Lee,20
session,1,1,Chrome,5,2017-01-01
user,2,Ann,Bee,30
session,2,2,Safari,9,2017-02-02
user,3,Sam,Lee,40
session,3,3,Firefox,7,2017-03-03
session,3,4,Firefox,8,2017-03-04
";
    let report = process(input, &Logger::quiet()).unwrap();

    assert_eq!(report.global.total_users, 3);
    assert_eq!(report.users_stats.len(), 2);

    let names: Vec<&str> = report.users_stats.iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["Sam Lee", "Ann Bee"]);

    let sam = report.users_stats.get("Sam Lee").unwrap();
    assert_eq!(sam.sessions_count, 2);
    assert_eq!(sam.browsers, "FIREFOX, FIREFOX");
}

#[test]
fn test_empty_input_produces_empty_report() {
    assert_eq!(
        run("").unwrap(),
        "{\"totalUsers\":0,\"uniqueBrowsersCount\":0,\"totalSessions\":0,\"allBrowsers\":\"\",\"usersStats\":{}}\n"
    );
}

// ============================================================
// Failures
// ============================================================

#[test]
fn test_orphan_session_fails() {
    let err = run("session,1,1,Chrome,10,2016-10-01\nuser,1,John,Smith,25\n").unwrap_err();
    assert!(matches!(
        err,
        ReportError::Record(RecordError::OrphanSessionRecord { line: 1 })
    ));
}

#[test]
fn test_unrecognized_record_fails() {
    let err = run("user,1,John,Smith,25\nvisitor,1\n").unwrap_err();
    assert!(matches!(
        err,
        ReportError::Record(RecordError::UnrecognizedRecordType { line: 2, .. })
    ));
}

#[test]
fn test_bad_date_fails() {
    let err = run("user,1,John,Smith,25\nsession,1,1,Chrome,10,never\n").unwrap_err();
    match err {
        ReportError::DateParseFailure { session_id, value } => {
            assert_eq!(session_id, "1");
            assert_eq!(value, "never");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_non_numeric_time_is_not_an_error() {
    let report = process(
        "user,1,John,Smith,25\nsession,1,1,Chrome,abc,2016-10-01\n",
        &Logger::quiet(),
    )
    .unwrap();
    let john = report.users_stats.get("John Smith").unwrap();
    assert_eq!(john.total_time, "0 min.");
    assert_eq!(john.longest_session, "0 min.");
}

// ============================================================
// Pipeline files
// ============================================================

#[test]
fn test_pipeline_writes_report_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("data.txt");
    let output = dir.path().join("result.json");
    fs::write(&input, SAMPLE).unwrap();

    let report = Pipeline::new(&input, &output)
        .run(&Logger::quiet())
        .unwrap();

    assert_eq!(report.global.total_users, 2);
    assert_eq!(fs::read_to_string(&output).unwrap(), SAMPLE_REPORT);
}

#[test]
fn test_pipeline_failure_leaves_output_untouched() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("data.txt");
    let output = dir.path().join("result.json");

    fs::write(&input, "session,1,1,Chrome,10,2016-10-01\n").unwrap();
    assert!(Pipeline::new(&input, &output).run(&Logger::quiet()).is_err());
    assert!(!output.exists());

    fs::write(&output, "previous").unwrap();
    fs::write(&input, "user,1,John,Smith,25\nsession,1,1,Chrome,10,bad-date\n").unwrap();
    assert!(Pipeline::new(&input, &output).run(&Logger::quiet()).is_err());
    assert_eq!(fs::read_to_string(&output).unwrap(), "previous");

    let leftovers: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(leftovers.len(), 2);
}

#[test]
fn test_pipeline_missing_input() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("result.json");

    let err = Pipeline::new(dir.path().join("nope.txt"), &output)
        .run(&Logger::quiet())
        .unwrap_err();
    assert!(matches!(err, ReportError::Read { .. }));
    assert!(!output.exists());
}
