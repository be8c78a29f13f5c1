//! Shared fixture: a tiny rental database on disk

use rusqlite::Connection;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct Fixture {
    _dir: TempDir,
    pub path: PathBuf,
}

pub fn rental_db() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rental.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE category (category_id INTEGER PRIMARY KEY, name TEXT NOT NULL);
         CREATE TABLE film (
             film_id INTEGER PRIMARY KEY,
             title TEXT NOT NULL,
             rating TEXT,
             rental_rate REAL
         );
         CREATE TABLE film_category (
             film_id INTEGER NOT NULL REFERENCES film(film_id),
             category_id INTEGER NOT NULL REFERENCES category(category_id)
         );
         INSERT INTO category VALUES (1, 'Action'), (2, 'Sci-Fi');
         INSERT INTO film VALUES
             (1, 'ZORRO ARK', 'NC-17', 4.99),
             (2, 'ACADEMY DINOSAUR', 'PG', 0.99),
             (3, 'ALIEN CENTER', 'NC-17', 2.99);
         INSERT INTO film_category VALUES (1, 1), (2, 1), (3, 2);",
    )
    .unwrap();
    Fixture { _dir: dir, path }
}
