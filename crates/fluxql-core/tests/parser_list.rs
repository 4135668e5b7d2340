//! Tests for LIST statements.

mod common;
use common::*;

use fluxql_core::ast::{Expr, ListFromStatement, ListStatement, SortField, Source, Statement};

fn region_filter() -> ListStatement {
    ListStatement {
        condition: Some(Expr::var_ref("region").eq(Expr::string("uswest"))),
        sort_fields: vec![
            SortField::direction(true),
            SortField::asc("field1"),
            SortField::desc("field2"),
        ],
        limit: Some(10),
    }
}

fn region_filter_from(source: &str) -> ListFromStatement {
    let filter = region_filter();
    ListFromStatement {
        source: Source::measurement(source),
        condition: filter.condition,
        sort_fields: filter.sort_fields,
        limit: filter.limit,
    }
}

const FILTER: &str = "WHERE region = 'uswest' ORDER BY ASC, field1, field2 DESC LIMIT 10";

#[test]
fn list_databases() {
    assert_eq!(parse("LIST DATABASES"), Statement::ListDatabases);
}

#[test]
fn list_continuous_queries() {
    assert_eq!(
        parse("LIST CONTINUOUS QUERIES"),
        Statement::ListContinuousQueries
    );
}

#[test]
fn list_series() {
    assert_eq!(
        parse("LIST SERIES"),
        Statement::ListSeries(ListStatement::default())
    );
}

#[test]
fn list_series_with_filter() {
    assert_eq!(
        parse(&format!("LIST SERIES {FILTER}")),
        Statement::ListSeries(region_filter())
    );
}

#[test]
fn list_measurements_with_filter() {
    assert_eq!(
        parse(&format!("LIST MEASUREMENTS {FILTER}")),
        Statement::ListMeasurements(region_filter())
    );
}

#[test]
fn list_tag_keys() {
    assert_eq!(
        parse(&format!("LIST TAG KEYS FROM src {FILTER}")),
        Statement::ListTagKeys(region_filter_from("src"))
    );
}

#[test]
fn list_tag_values() {
    assert_eq!(
        parse(&format!("LIST TAG VALUES FROM src {FILTER}")),
        Statement::ListTagValues(region_filter_from("src"))
    );
}

#[test]
fn list_field_keys() {
    assert_eq!(
        parse(&format!("LIST FIELD KEYS FROM src {FILTER}")),
        Statement::ListFieldKeys(region_filter_from("src"))
    );
}

#[test]
fn list_field_values() {
    assert_eq!(
        parse(&format!("LIST FIELD VALUES FROM src {FILTER}")),
        Statement::ListFieldValues(region_filter_from("src"))
    );
}

#[test]
fn tag_and_field_listings_require_from() {
    assert_eq!(
        parse_err("LIST TAG KEYS").to_string(),
        "found EOF, expected FROM at line 1, char 14"
    );
    assert_eq!(
        parse_err("LIST FIELD VALUES WHERE a = 1").to_string(),
        "found WHERE, expected FROM at line 1, char 19"
    );
}

#[test]
fn list_field_keys_from_join() {
    let Statement::ListFieldKeys(stmt) = parse("LIST FIELD KEYS FROM join(cpu, mem)") else {
        panic!("Expected LIST FIELD KEYS");
    };
    assert!(matches!(stmt.source, Source::Join(ref ms) if ms.len() == 2));
}

#[test]
fn list_keywords_are_case_insensitive() {
    assert_eq!(parse("list databases"), Statement::ListDatabases);
    assert_eq!(
        parse("List Tag Values From cpu"),
        Statement::ListTagValues(ListFromStatement {
            source: Source::measurement("cpu"),
            condition: None,
            sort_fields: Vec::new(),
            limit: None,
        })
    );
}
