use std::sync::{Arc, Mutex};

use datagrid::{
    CellValue, Column, ConfigError, Grid, GridConfig, GridError, GridRow, MatchMode,
    PaginationState, SortDirection,
};

#[derive(Debug, Clone)]
struct Repo {
    name: &'static str,
    stars: i64,
}

impl GridRow for Repo {
    fn field(&self, key: &str) -> CellValue {
        match key {
            "name" => CellValue::from(self.name),
            "stars" => CellValue::from(self.stars),
            _ => CellValue::Null,
        }
    }
}

fn repos() -> Vec<Repo> {
    (0..23)
        .map(|i| Repo {
            name: ["serde", "tokio", "clap", "log"][i % 4],
            stars: i as i64 * 100,
        })
        .collect()
}

fn columns() -> Vec<Column<Repo>> {
    vec![
        Column::new("name", "Name").field("name").sortable(),
        Column::new("stars", "Stars").field("stars"),
        Column::new("open", "Open"),
    ]
}

#[test]
fn test_partial_config_from_json() {
    let config: GridConfig =
        serde_json::from_str(r#"{"default_page_size": 25, "match_mode": "fuzzy"}"#).unwrap();
    assert_eq!(config.default_page_size, 25);
    assert_eq!(config.match_mode, MatchMode::Fuzzy);
    assert_eq!(config.page_size_options, vec![10, 25, 50]);
    assert!(!config.column_filters_enabled);
    assert!(!config.row_selection_enabled);

    let grid = Grid::new(columns(), config).with_data(repos());
    assert_eq!(grid.page_size(), 25);
    assert_eq!(grid.total_pages(), 1);
}

#[test]
fn test_config_round_trips_through_json() {
    let config = GridConfig::default()
        .with_page_size_options(vec![5, 20])
        .with_row_selection(true);
    let json = serde_json::to_value(&config).unwrap();
    assert_eq!(json["page_size_options"], serde_json::json!([5, 20]));
    assert_eq!(json["match_mode"], "contains");
    assert_eq!(serde_json::from_value::<GridConfig>(json).unwrap(), config);
}

#[test]
fn test_try_new_rejects_invalid_config() {
    let err = Grid::try_new(columns(), GridConfig::default().with_default_page_size(0)).unwrap_err();
    assert_eq!(err, GridError::InvalidConfig(ConfigError::InvalidDefaultPageSize));

    let err = Grid::try_new(columns(), GridConfig::default().with_page_size_options(vec![])).unwrap_err();
    assert_eq!(err, GridError::InvalidConfig(ConfigError::EmptyPageSizeOptions));

    let mut duplicated = columns();
    duplicated.push(Column::new("name", "Again").field("name"));
    let err = Grid::try_new(duplicated, GridConfig::default()).unwrap_err();
    assert_eq!(err, GridError::InvalidConfig(ConfigError::DuplicateColumn("name".into())));
    assert_eq!(
        err.to_string(),
        "Invalid grid configuration: Column id 'name' is used more than once"
    );
}

#[test]
fn test_lenient_constructor_corrects_config() {
    let grid = Grid::new(
        columns(),
        GridConfig::default()
            .with_default_page_size(0)
            .with_page_size_options(vec![0, 0]),
    )
    .with_data(repos());
    assert_eq!(grid.page_size(), 1);
    assert_eq!(grid.page_size_options(), &[1]);
    assert_eq!(grid.total_pages(), 23);
}

#[test]
fn test_try_sort_by_errors() {
    let mut grid = Grid::new(columns(), GridConfig::default()).with_data(repos());

    assert_eq!(
        grid.try_sort_by("missing", SortDirection::Asc),
        Err(GridError::UnknownColumn("missing".into()))
    );
    assert_eq!(
        grid.try_sort_by("stars", SortDirection::Asc),
        Err(GridError::ColumnNotSortable("stars".into()))
    );
    assert_eq!(
        grid.try_sort_by("open", SortDirection::Desc),
        Err(GridError::ColumnNotSortable("open".into()))
    );
    assert!(!grid.sort_state().is_active());

    assert_eq!(grid.try_sort_by("name", SortDirection::Desc), Ok(()));
    assert_eq!(grid.visible_rows()[0].name, "tokio");
}

#[test]
fn test_try_set_page_size_rejects_zero() {
    let mut grid = Grid::new(columns(), GridConfig::default()).with_data(repos());
    grid.set_page(2);

    assert_eq!(grid.try_set_page_size(0), Err(GridError::InvalidPageSize(0)));
    assert_eq!(grid.page_size(), 10);
    assert_eq!(grid.page(), 2);

    // Sizes outside the offered options are still accepted.
    assert_eq!(grid.try_set_page_size(7), Ok(()));
    assert_eq!(grid.total_pages(), 4);
}

#[test]
fn test_controlled_pagination() {
    let proposed: Arc<Mutex<Vec<PaginationState>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&proposed);
    let mut grid = Grid::new(columns(), GridConfig::default())
        .with_data(repos())
        .with_controlled_pagination(PaginationState::new(5).with_page(2), move |next| {
            sink.lock().unwrap().push(*next)
        });
    assert_eq!(grid.page(), 2);

    grid.next_page();
    assert_eq!(
        proposed.lock().unwrap().last(),
        Some(&PaginationState { page: 3, page_size: 5 })
    );
    assert_eq!(grid.page(), 2, "mirror only changes on sync");

    grid.sync_pagination(PaginationState { page: 3, page_size: 5 });
    assert_eq!(grid.page(), 3);

    grid.set_page_size(10);
    assert_eq!(
        proposed.lock().unwrap().last(),
        Some(&PaginationState { page: 1, page_size: 10 })
    );

    // An owner handing back an out-of-range page still gets a clamped view.
    grid.sync_pagination(PaginationState { page: 40, page_size: 10 });
    assert_eq!(grid.page(), 3);
    assert_eq!(grid.page_rows().len(), 3);
}

#[test]
fn test_dirty_flag() {
    let mut grid = Grid::new(columns(), GridConfig::default()).with_data(repos());
    assert!(!grid.is_dirty());

    grid.set_global_query("serde");
    assert!(grid.is_dirty());
    grid.clear_dirty();

    grid.set_global_query("serde");
    assert!(!grid.is_dirty());

    grid.set_page(1);
    assert!(!grid.is_dirty());

    grid.set_data(repos());
    assert!(grid.is_dirty());
}
