//! Tests for building snapshots from scripts and for the JSON file format.

mod common;
use common::*;

use std::collections::BTreeSet;

use tablediff_core::prelude::*;

const DUMP: &str = "-- MySQL dump 10.13
/*!40101 SET @OLD_CHARACTER_SET_CLIENT=@@CHARACTER_SET_CLIENT */;
/*!40101 SET NAMES utf8mb4 */;

--
-- Table structure for table `users`
--

DROP TABLE IF EXISTS `users`;
/*!40101 SET @saved_cs_client     = @@character_set_client */;
CREATE TABLE `users` (
  `id` bigint(20) NOT NULL AUTO_INCREMENT,
  `bio` text COMMENT 'semi;colon',
  PRIMARY KEY (`id`)
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4;
/*!40101 SET character_set_client = @saved_cs_client */;

DROP TABLE IF EXISTS `audit`;
CREATE TABLE `audit` (
  `id` int NOT NULL,
  `msg` varchar(64) DEFAULT NULL
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COMMENT='审计';
";

#[test]
fn script_tables_in_order() {
    let snapshot =
        SchemaDescription::from_script(DUMP, Dialect::MySql, LoadPolicy::Strict).unwrap();
    let names: Vec<&str> = snapshot.table_names().collect();
    assert_eq!(names, vec!["users", "audit"]);

    let bio = snapshot.table("users").unwrap().column("bio").unwrap();
    assert_eq!(bio.specs, vec!["COMMENT", "'semi;colon'"]);
    assert!(snapshot.table("audit").unwrap().raw_sql.ends_with("COMMENT='审计'"));
}

#[test]
fn split_ignores_semicolons_in_literals() {
    let statements = split_statements(DUMP);
    let creates = statements
        .iter()
        .filter(|s| s.starts_with("CREATE TABLE"))
        .count();
    assert_eq!(creates, 2);
    assert_eq!(statements.len(), 4);
}

#[test]
fn skip_invalid_policy() {
    let script = format!("{DUMP}\nCREATE TABLE `broken` (`id` int,);\nCREATE TABLE ok (id int);");

    let err = SchemaDescription::from_script(&script, Dialect::MySql, LoadPolicy::Strict);
    assert!(matches!(err, Err(Error::Parse(_))));

    let snapshot =
        SchemaDescription::from_script(&script, Dialect::MySql, LoadPolicy::SkipInvalid).unwrap();
    let names: Vec<&str> = snapshot.table_names().collect();
    assert_eq!(names, vec!["users", "audit", "ok"]);
}

#[test]
fn snapshot_round_trip() {
    let snapshot = schema(&[ORDERS, USERS]);
    for pretty in [true, false] {
        let json = snapshot.to_json(pretty).unwrap();
        assert_eq!(SchemaDescription::from_json(&json).unwrap(), snapshot);
    }
}

#[test]
fn snapshot_field_names() {
    let json = schema(&[USERS]).to_json(false).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let table = &value["tables"][0];
    assert_eq!(table["name"], "users");
    assert_eq!(table["rawSql"], USERS);
    assert_eq!(table["columns"][1]["type"], "varchar(255)");
    assert_eq!(table["indexes"][0]["name"], "__PK__");
    assert_eq!(table["indexes"][0]["type"], "PRIMARY KEY");
    assert_eq!(value["timestamp"], "2024-05-01T10:20:30");
}

#[test]
fn reloaded_snapshot_diffs_like_the_original() {
    let left = schema(&[ORDERS]);
    let right = schema(&[USERS, ORDERS.replace("COMMENT='orders'", "COMMENT='all'").as_str()]);
    let reloaded = SchemaDescription::from_json(&right.to_json(true).unwrap()).unwrap();

    let direct = compare(&left, &right, &BTreeSet::new());
    let via_json = compare(&left, &reloaded, &BTreeSet::new());
    assert_eq!(direct, via_json);
    assert_eq!(direct.tables.len(), 1);
    assert_eq!(direct.inside_tables.len(), 1);
}

#[test]
fn diff_round_trip() {
    let left = schema(&["CREATE TABLE a (id INT)", "CREATE TABLE b (id INT) COMMENT='x'"]);
    let right = schema(&["CREATE TABLE b (id INT, v TEXT) COMMENT='y'"]);
    let result = compare(&left, &right, &BTreeSet::new());

    let json = result.to_json(true).unwrap();
    assert!(json.contains("\"insideTables\""));
    assert_eq!(SchemaDiff::from_json(&json).unwrap(), result);
}

#[test]
fn diff_json_requires_a_side() {
    let json = r#"{
        "tables": [],
        "insideTables": [{
            "name": "t",
            "columns": [],
            "indexes": [],
            "option": {"left": null, "right": null}
        }],
        "timestamp": "2024-05-01T10:20:30"
    }"#;
    let err = SchemaDiff::from_json(json).unwrap_err();
    assert!(err.to_string().contains("StringDiff"), "{err}");
}
