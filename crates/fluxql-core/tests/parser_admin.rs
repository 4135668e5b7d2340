//! Tests for administrative statements: databases, users, privileges,
//! retention policies and continuous queries.

mod common;
use common::*;

use std::time::Duration;

use fluxql_core::ast::{
    AlterRetentionPolicyStatement, CreateContinuousQueryStatement,
    CreateRetentionPolicyStatement, Expr, Field, Privilege, PrivilegeStatement, SelectStatement,
    Source, Statement, Target,
};

fn alter(
    duration: Option<Duration>,
    replication: Option<u32>,
    default: bool,
) -> Statement {
    Statement::AlterRetentionPolicy(AlterRetentionPolicyStatement {
        name: "policy1".into(),
        database: "testdb".into(),
        duration,
        replication,
        default,
    })
}

fn grant(privilege: Privilege, on: Option<&str>) -> PrivilegeStatement {
    PrivilegeStatement {
        privilege,
        on: on.map(Into::into),
        user: "jdoe".into(),
    }
}

// ===================================================================
// Databases and users
// ===================================================================

#[test]
fn create_database() {
    assert_eq!(
        parse("CREATE DATABASE testdb"),
        Statement::CreateDatabase {
            name: "testdb".into()
        }
    );
}

#[test]
fn create_database_quoted_name() {
    assert_eq!(
        parse(r#"CREATE DATABASE "my db""#),
        Statement::CreateDatabase {
            name: "my db".into()
        }
    );
}

#[test]
fn drop_database() {
    assert_eq!(
        parse("DROP DATABASE testdb"),
        Statement::DropDatabase {
            name: "testdb".into()
        }
    );
}

#[test]
fn create_user() {
    assert_eq!(
        parse("CREATE USER testuser WITH PASSWORD pwd1337"),
        Statement::CreateUser {
            name: "testuser".into(),
            password: "pwd1337".into(),
        }
    );
}

#[test]
fn create_user_quoted_password() {
    assert_eq!(
        parse("CREATE USER testuser WITH PASSWORD 'p@ss word'"),
        Statement::CreateUser {
            name: "testuser".into(),
            password: "p@ss word".into(),
        }
    );
}

#[test]
fn drop_user() {
    assert_eq!(
        parse("DROP USER jdoe"),
        Statement::DropUser {
            name: "jdoe".into()
        }
    );
}

#[test]
fn drop_series() {
    assert_eq!(
        parse("DROP SERIES myseries"),
        Statement::DropSeries {
            name: "myseries".into()
        }
    );
}

// ===================================================================
// GRANT / REVOKE
// ===================================================================

#[test]
fn grant_on_database() {
    for (query, privilege) in [
        ("GRANT READ ON testdb TO jdoe", Privilege::Read),
        ("GRANT WRITE ON testdb TO jdoe", Privilege::Write),
        ("GRANT ALL ON testdb TO jdoe", Privilege::All),
        ("GRANT ALL PRIVILEGES ON testdb TO jdoe", Privilege::All),
    ] {
        assert_eq!(
            parse(query),
            Statement::Grant(grant(privilege, Some("testdb"))),
            "{query}"
        );
    }
}

#[test]
fn grant_cluster_admin() {
    assert_eq!(
        parse("GRANT ALL PRIVILEGES TO jdoe"),
        Statement::Grant(grant(Privilege::All, None))
    );
}

#[test]
fn revoke_on_database() {
    for (query, privilege) in [
        ("REVOKE READ on testdb FROM jdoe", Privilege::Read),
        ("REVOKE WRITE ON testdb FROM jdoe", Privilege::Write),
        ("REVOKE ALL ON testdb FROM jdoe", Privilege::All),
        ("REVOKE ALL PRIVILEGES ON testdb FROM jdoe", Privilege::All),
    ] {
        assert_eq!(
            parse(query),
            Statement::Revoke(grant(privilege, Some("testdb"))),
            "{query}"
        );
    }
}

#[test]
fn revoke_cluster_admin() {
    assert_eq!(
        parse("REVOKE ALL FROM jdoe"),
        Statement::Revoke(grant(Privilege::All, None))
    );
}

// ===================================================================
// Retention policies
// ===================================================================

#[test]
fn create_retention_policy() {
    assert_eq!(
        parse("CREATE RETENTION POLICY policy1 ON testdb DURATION 1h REPLICATION 2"),
        Statement::CreateRetentionPolicy(CreateRetentionPolicyStatement {
            name: "policy1".into(),
            database: "testdb".into(),
            duration: Duration::from_secs(3600),
            replication: 2,
            default: false,
        })
    );
}

#[test]
fn create_retention_policy_default() {
    assert_eq!(
        parse("CREATE RETENTION POLICY policy1 ON testdb DURATION 2m REPLICATION 4 DEFAULT"),
        Statement::CreateRetentionPolicy(CreateRetentionPolicyStatement {
            name: "policy1".into(),
            database: "testdb".into(),
            duration: Duration::from_secs(120),
            replication: 4,
            default: true,
        })
    );
}

#[test]
fn create_retention_policy_max_replication() {
    let Statement::CreateRetentionPolicy(rp) =
        parse("CREATE RETENTION POLICY p ON db DURATION 1d REPLICATION 2147483647")
    else {
        panic!("Expected CREATE RETENTION POLICY");
    };
    assert_eq!(rp.replication, 2_147_483_647);
}

#[test]
fn alter_retention_policy_all_options() {
    assert_eq!(
        parse("ALTER RETENTION POLICY policy1 ON testdb DURATION 1m REPLICATION 4 DEFAULT"),
        alter(Some(Duration::from_secs(60)), Some(4), true)
    );
}

#[test]
fn alter_retention_policy_reverse_order() {
    assert_eq!(
        parse("ALTER RETENTION POLICY policy1 ON testdb DEFAULT REPLICATION 4 DURATION 1m"),
        alter(Some(Duration::from_secs(60)), Some(4), true)
    );
}

#[test]
fn alter_retention_policy_partial_options() {
    assert_eq!(
        parse("ALTER RETENTION POLICY policy1 ON testdb DEFAULT REPLICATION 4"),
        alter(None, Some(4), true)
    );
    assert_eq!(
        parse("ALTER RETENTION POLICY policy1 ON testdb DEFAULT"),
        alter(None, None, true)
    );
    assert_eq!(
        parse("ALTER RETENTION POLICY policy1 ON testdb REPLICATION 4"),
        alter(None, Some(4), false)
    );
}

#[test]
fn alter_retention_policy_stops_at_other_token() {
    let query = fluxql_core::parse_query(
        "ALTER RETENTION POLICY policy1 ON testdb DEFAULT; LIST DATABASES",
    )
    .unwrap();
    assert_eq!(
        query.statements,
        vec![alter(None, None, true), Statement::ListDatabases]
    );
}

// ===================================================================
// Continuous queries
// ===================================================================

fn count_into(target: Target) -> SelectStatement {
    SelectStatement {
        target: Some(target),
        ..SelectStatement::new(
            vec![Field::new(Expr::call("count", vec![]))],
            Source::measurement("myseries"),
        )
    }
}

#[test]
fn create_continuous_query() {
    assert_eq!(
        parse(
            "CREATE CONTINUOUS QUERY myquery ON testdb BEGIN SELECT count() INTO measure1 FROM myseries END"
        ),
        Statement::CreateContinuousQuery(CreateContinuousQueryStatement {
            name: "myquery".into(),
            database: "testdb".into(),
            source: count_into(Target::new("measure1")),
        })
    );
}

#[test]
fn create_continuous_query_qualified_target() {
    assert_eq!(
        parse(
            r#"CREATE CONTINUOUS QUERY myquery ON testdb BEGIN SELECT count() INTO "1h.policy1"."cpu.load" FROM myseries END"#
        ),
        Statement::CreateContinuousQuery(CreateContinuousQueryStatement {
            name: "myquery".into(),
            database: "testdb".into(),
            source: count_into(Target {
                retention_policy: Some("1h.policy1".into()),
                measurement: "cpu.load".into(),
                database: None,
            }),
        })
    );
}

#[test]
fn create_continuous_query_with_group_by() {
    let Statement::CreateContinuousQuery(cq) = parse(
        "CREATE CONTINUOUS QUERY cq ON db BEGIN SELECT mean(value) INTO cpu_1h FROM cpu GROUP BY 1h END",
    ) else {
        panic!("Expected CREATE CONTINUOUS QUERY");
    };
    assert_eq!(cq.source.dimensions.len(), 1);
    assert_eq!(cq.source.target, Some(Target::new("cpu_1h")));
}

#[test]
fn drop_continuous_query() {
    assert_eq!(
        parse("DROP CONTINUOUS QUERY myquery"),
        Statement::DropContinuousQuery {
            name: "myquery".into()
        }
    );
}
