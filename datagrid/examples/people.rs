use std::fs::File;

use chrono::{DateTime, TimeZone, Utc};
use datagrid::prelude::*;
use simplelog::{Config, LevelFilter, WriteLogger};

#[derive(Debug, Clone)]
struct Person {
    email: &'static str,
    name: &'static str,
    team: Option<&'static str>,
    commits: i64,
    joined: DateTime<Utc>,
}

impl GridRow for Person {
    fn field(&self, key: &str) -> CellValue {
        match key {
            "name" => CellValue::from(self.name),
            "team" => CellValue::from(self.team),
            "commits" => CellValue::from(self.commits),
            "joined" => CellValue::from(self.joined),
            _ => CellValue::Null,
        }
    }
}

fn person(
    email: &'static str,
    name: &'static str,
    team: Option<&'static str>,
    commits: i64,
    year: i32,
) -> Person {
    Person {
        email,
        name,
        team,
        commits,
        joined: Utc
            .with_ymd_and_hms(year, 3, 1, 0, 0, 0)
            .single()
            .unwrap_or_default(),
    }
}

fn people() -> Vec<Person> {
    vec![
        person("ada@corp.io", "Ada Lovelace", Some("Compilers"), 412, 2019),
        person("alan@corp.io", "Alan Turing", Some("Research"), 87, 2021),
        person("grace@corp.io", "Grace Hopper", Some("Compilers"), 655, 2018),
        person("ken@corp.io", "Ken Thompson", Some("Kernel"), 903, 2017),
        person("barbara@corp.io", "Barbara Liskov", Some("Research"), 240, 2020),
        person("dennis@corp.io", "Dennis Ritchie", Some("Kernel"), 771, 2017),
        person("margaret@corp.io", "Margaret Hamilton", None, 128, 2022),
        person("linus@corp.io", "Linus Torvalds", Some("Kernel"), 1204, 2016),
        person("radia@corp.io", "Radia Perlman", Some("Networking"), 333, 2019),
        person("vint@corp.io", "Vint Cerf", Some("Networking"), 56, 2023),
        person("frances@corp.io", "Frances Allen", Some("Compilers"), 498, 2018),
        person("john@corp.io", "John McCarthy", None, 19, 2024),
    ]
}

fn columns() -> Vec<Column<Person>> {
    vec![
        Column::new("name", "Name").field("name").sortable(),
        Column::new("team", "Team").field("team").sortable(),
        Column::new("commits", "Commits").field("commits").sortable(),
        Column::new("joined", "Joined").field("joined").sortable(),
        Column::new("initials", "Initials").derive(|p: &Person| {
            p.name
                .split_whitespace()
                .filter_map(|word| word.chars().next())
                .collect::<String>()
        }),
    ]
}

fn render(title: &str, grid: &Grid<Person>) {
    let snapshot = grid.snapshot();
    println!("== {} ==", title);

    let header = match snapshot.header_selection {
        HeaderSelection::All => "[x]",
        HeaderSelection::Some => "[-]",
        HeaderSelection::None => "[ ]",
    };
    let indicator = |id: &str| match snapshot.sort_direction(id) {
        Some(SortDirection::Asc) => " ^",
        Some(SortDirection::Desc) => " v",
        None => "",
    };
    println!(
        "{} {:<20} {:<12} {:>8} {:<10}",
        header,
        format!("Name{}", indicator("name")),
        format!("Team{}", indicator("team")),
        format!("Commits{}", indicator("commits")),
        format!("Joined{}", indicator("joined")),
    );

    for row in &snapshot.rows {
        println!(
            "{} {:<20} {:<12} {:>8} {:<10}",
            if row.selected { "[x]" } else { "[ ]" },
            row.row.name,
            row.row.team.unwrap_or("-"),
            row.row.commits,
            row.row.joined.format("%Y-%m-%d"),
        );
    }

    match snapshot.window.display_range() {
        Some((first, last)) => println!(
            "rows {}-{} of {} ({} total), page {}/{}, {} selected",
            first,
            last,
            snapshot.visible_count,
            snapshot.total_count,
            snapshot.window.page,
            snapshot.window.total_pages,
            snapshot.selected_count,
        ),
        None => println!("no matching rows, {} selected", snapshot.selected_count),
    }
    println!();
}

fn main() -> std::io::Result<()> {
    let log_file = File::create("datagrid-demo.log")?;
    if let Err(e) = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let config = GridConfig::default()
        .with_default_page_size(5)
        .with_page_size_options(vec![5, 10, 25])
        .with_column_filters(true)
        .with_row_selection(true);

    let mut grid = Grid::new(columns(), config)
        .with_data(people())
        .with_row_id(|p: &Person, _| p.email.to_string());
    render("initial", &grid);

    grid.dispatch(GridEvent::ToggleSort {
        column_id: "commits".into(),
    });
    grid.dispatch(GridEvent::ToggleSort {
        column_id: "commits".into(),
    });
    render("most commits first", &grid);

    grid.dispatch(GridEvent::SetColumnFilter {
        column_id: "team".into(),
        text: "kernel".into(),
    });
    grid.dispatch(GridEvent::ToggleSelectAll);
    render("kernel team selected", &grid);

    grid.dispatch(GridEvent::ClearFilters);
    grid.dispatch(GridEvent::SetQuery {
        query: "2018".into(),
    });
    grid.dispatch(GridEvent::ToggleRow {
        id: "grace@corp.io".into(),
    });
    render("joined in 2018", &grid);

    grid.dispatch(GridEvent::ClearFilters);
    grid.dispatch(GridEvent::SetPageSize { page_size: 10 });
    grid.dispatch(GridEvent::LastPage);
    render("last page of ten", &grid);

    grid.set_data(people()[..7].to_vec());
    render("after shrinking the data", &grid);

    println!("selected: {}", grid.selected_ids().join(", "));
    Ok(())
}
