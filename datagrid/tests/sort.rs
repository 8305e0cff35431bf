use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use datagrid::{
    CellValue, Column, Grid, GridConfig, GridRow, SortDirection, SortState, sort_rows,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone)]
struct User {
    name: &'static str,
    tasks: Option<i64>,
}

impl GridRow for User {
    fn field(&self, key: &str) -> CellValue {
        match key {
            "name" => CellValue::from(self.name),
            "tasks" => CellValue::from(self.tasks),
            _ => CellValue::Null,
        }
    }
}

fn users() -> Vec<User> {
    vec![
        User { name: "Alpha", tasks: Some(10) },
        User { name: "Beta", tasks: Some(10) },
        User { name: "Gamma", tasks: Some(8) },
    ]
}

fn columns() -> Vec<Column<User>> {
    vec![
        Column::new("name", "Name").field("name").sortable(),
        Column::new("tasks", "Tasks").field("tasks").sortable(),
        Column::new("notes", "Notes").field("name"),
        Column::new("actions", "Actions").sortable(),
    ]
}

fn grid() -> Grid<User> {
    Grid::new(columns(), GridConfig::default()).with_data(users())
}

fn names(grid: &Grid<User>) -> Vec<&'static str> {
    grid.visible_rows().iter().map(|u| u.name).collect()
}

#[test]
fn test_ties_keep_input_order() {
    let mut grid = grid();

    assert_eq!(grid.toggle_sort("tasks"), Some(SortState::asc("tasks")));
    assert_eq!(names(&grid), vec!["Gamma", "Alpha", "Beta"]);

    assert_eq!(grid.toggle_sort("tasks"), Some(SortState::desc("tasks")));
    assert_eq!(names(&grid), vec!["Beta", "Alpha", "Gamma"]);
}

#[test]
fn test_toggle_cycle() {
    let mut grid = grid();
    assert_eq!(grid.sort_direction("name"), None);

    grid.toggle_sort("name");
    assert_eq!(grid.sort_direction("name"), Some(SortDirection::Asc));
    assert_eq!(grid.sort_direction("tasks"), None);

    grid.toggle_sort("name");
    assert_eq!(grid.sort_direction("name"), Some(SortDirection::Desc));

    // Switching columns starts ascending.
    grid.toggle_sort("tasks");
    assert_eq!(grid.sort_direction("name"), None);
    assert_eq!(grid.sort_direction("tasks"), Some(SortDirection::Asc));

    grid.clear_sort();
    assert_eq!(names(&grid), vec!["Alpha", "Beta", "Gamma"]);
}

#[test]
fn test_toggle_twice_reverses_exactly() {
    let mut rng = StdRng::seed_from_u64(7);
    let columns = columns();

    for _ in 0..100 {
        let rows: Vec<User> = (0..rng.random_range(0..30))
            .map(|_| User {
                name: ["Ann", "Ben", "Cid", "Dee"][rng.random_range(0..4)],
                tasks: if rng.random_bool(0.2) {
                    None
                } else {
                    Some(rng.random_range(-5..5))
                },
            })
            .collect();
        let indices: Vec<usize> = (0..rows.len()).collect();

        for column in ["name", "tasks"] {
            let asc = sort_rows(&rows, &indices, &columns, &SortState::asc(column));
            let desc = sort_rows(&rows, &indices, &columns, &SortState::asc(column).toggled(column));
            let mut reversed = asc.clone();
            reversed.reverse();
            assert_eq!(desc, reversed);

            let mut sorted_input = asc.clone();
            sorted_input.sort_unstable();
            assert_eq!(sorted_input, indices, "sort must be a permutation");
        }
    }
}

#[test]
fn test_null_sorts_after_numbers() {
    let mut grid = Grid::new(columns(), GridConfig::default()).with_data(vec![
        User { name: "Alpha", tasks: Some(3) },
        User { name: "Beta", tasks: None },
        User { name: "Gamma", tasks: Some(-1) },
    ]);
    grid.toggle_sort("tasks");
    assert_eq!(names(&grid), vec!["Gamma", "Alpha", "Beta"]);
}

#[test]
fn test_unknown_and_unsortable_columns_are_ignored() {
    let mut grid = grid();
    grid.toggle_sort("name");
    grid.clear_dirty();

    assert_eq!(grid.toggle_sort("missing"), None);
    assert_eq!(grid.toggle_sort("notes"), None);
    assert_eq!(grid.toggle_sort("actions"), None);

    assert_eq!(grid.sort_state(), &SortState::asc("name"));
    assert!(!grid.is_dirty());
}

#[test]
fn test_sort_only_reorders_filtered_rows() {
    let mut grid = grid();
    grid.set_global_query("a");
    grid.sort_by("name", SortDirection::Desc);
    assert_eq!(names(&grid), vec!["Gamma", "Beta", "Alpha"]);

    grid.set_global_query("mm");
    assert_eq!(names(&grid), vec!["Gamma"]);
    assert_eq!(grid.sort_state(), &SortState::desc("name"));
}

#[test]
fn test_derived_column_sorts_by_computed_value() {
    let columns = vec![
        Column::new("name", "Name").field("name"),
        Column::new("length", "Length")
            .derive(|u: &User| u.name.len() as i64)
            .sortable(),
    ];
    let mut grid = Grid::new(columns, GridConfig::default()).with_data(users());
    grid.sort_by("length", SortDirection::Asc);
    assert_eq!(names(&grid), vec!["Beta", "Alpha", "Gamma"]);
}

#[test]
fn test_pagination_does_not_recompute_sort() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let columns = vec![
        Column::new("name", "Name")
            .derive(move |u: &User| {
                counter.fetch_add(1, Ordering::SeqCst);
                u.name
            })
            .sortable(),
    ];

    let rows: Vec<User> = (0..12)
        .map(|i| User {
            name: ["Kim", "Lee", "Max"][i % 3],
            tasks: Some(i as i64),
        })
        .collect();
    let mut grid = Grid::new(columns, GridConfig::default().with_default_page_size(5)).with_data(rows);

    grid.toggle_sort("name");
    assert_eq!(grid.page_rows().len(), 5);
    let after_sort = calls.load(Ordering::SeqCst);
    assert_eq!(after_sort, 12);

    grid.next_page();
    grid.last_page();
    assert_eq!(grid.page_rows().len(), 2);
    grid.set_page_size(4);
    assert_eq!(grid.page_rows().len(), 4);
    assert_eq!(calls.load(Ordering::SeqCst), after_sort);

    grid.toggle_sort("name");
    assert_eq!(grid.page_rows().len(), 4);
    assert_eq!(calls.load(Ordering::SeqCst), after_sort + 12);
}

#[test]
fn test_mixed_numbers_sort_exactly_above_2_pow_53() {
    let big = 1i64 << 53;
    let row = |value: CellValue| HashMap::from([("v".to_string(), value)]);
    let rows = vec![
        row(CellValue::Int(big + 1)),
        row(CellValue::Float(big as f64)),
        row(CellValue::Int(big)),
        row(CellValue::Float(0.5)),
        row(CellValue::Int(big - 1)),
    ];
    let mut grid = Grid::new(
        vec![Column::new("v", "Value").field("v").sortable()],
        GridConfig::default(),
    )
    .with_data(rows);

    grid.toggle_sort("v");
    let order: Vec<_> = grid.visible_rows().iter().map(|r| r["v"].clone()).collect();
    assert_eq!(
        order,
        vec![
            CellValue::Float(0.5),
            CellValue::Int(big - 1),
            CellValue::Float(big as f64),
            CellValue::Int(big),
            CellValue::Int(big + 1),
        ]
    );
}
