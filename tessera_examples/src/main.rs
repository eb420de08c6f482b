// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Walks a small sheet through the derived operations and prints each result.
//!
//! Run with `RUST_LOG=trace` to see the backend requests behind every step.

use tessera_algebra::{
    Locator, Table, TableError, below, column, delete_column, duplicate_row, fold, insert_column,
    join_rows, right, row, select, top, transpose,
};
use tessera_core::{Value, col};

fn show(label: &str, table: &Table) {
    println!("{label}:");
    print!("{table}");
    println!();
}

fn main() -> Result<(), TableError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let sheet = Table::from_grid([
        ["desc", "a"],
        ["school", "b"],
        ["1", "2"],
        ["3", "4"],
    ])?;
    log::info!("loaded {} cells", sheet.len());
    show("sheet", &sheet);

    let school = select(&sheet, &col("v").eq("school"))?;
    println!("cells holding \"school\": {:?}\n", school.to_tuples()?);

    show("below \"school\"", &below(&sheet, Locator::value("school"))?);
    show("top row", &top(&sheet)?);
    show("transposed", &transpose(&sheet)?);

    let extra = Table::from_grid([["x"], ["y"], ["z"], ["w"]])?;
    let widened = insert_column(&sheet, &extra, 1)?;
    show("column inserted at 1", &widened);
    show("and deleted again", &delete_column(&widened, 1)?);
    show("row 1 duplicated", &duplicate_row(&sheet, 1)?);

    let left = Table::from_grid([["a", "1"], ["b", "2"]])?;
    let right_side = Table::from_grid([["b", "3"], ["c", "4"]])?;
    show(
        "rows joined on matching values",
        &join_rows(&left.matching(&right_side)?, &left, &right_side)?,
    );

    let cross_tab = Table::from_grid([
        [None, Some("a"), Some("b")],
        [Some("A"), Some("1"), Some("2")],
        [Some("B"), Some("3"), Some("4")],
    ])?;
    let indices = below(&column(&cross_tab, Locator::index(0))?, Locator::index(0))?;
    let headers = right(&row(&cross_tab, Locator::index(0))?, Locator::index(0))?;
    let body = right(&below(&cross_tab, Locator::index(0))?, Locator::index(0))?;
    let tall = fold(&indices, &headers, &body)?;
    show("cross-tab folded", &tall);

    let grid = tall.to_grid(Value::from("-"))?;
    log::info!("folded into {} rows", grid.len());
    Ok(())
}
