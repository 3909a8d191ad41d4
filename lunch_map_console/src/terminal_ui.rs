use console::{Style, Term};
use itertools::Itertools;

use lunch_map::menu::{MenuContent, MenuType};
use lunch_map::restaurant_filter::RestaurantFilter;
use lunch_map::session::Session;
use lunch_map::ui::{ClientUi, RestaurantRow};


// Presentation over stdout. Filter and menu type come from the command line, so they are fixed
// for the lifetime of one invocation.
pub struct TerminalUi {
    term: Term,
    filter: RestaurantFilter,
    menu_type: MenuType,
}

impl TerminalUi {
    pub fn new(filter: RestaurantFilter, menu_type: MenuType) -> Self {
        TerminalUi { term: Term::stdout(), filter, menu_type }
    }

    // Terminal errors are not worth failing the command over.
    fn print(&self, text: impl AsRef<str>) { let _ = self.term.write_line(text.as_ref()); }
}

pub fn render_row(row: &RestaurantRow) -> String {
    let star = if row.favourite { " ⭐" } else { "" };
    format!(
        "{}{}\n    {}\n    {}",
        Style::new().bold().apply_to(&row.name),
        star,
        row.address_line,
        Style::new().dim().apply_to(format!("id: {}", row.id))
    )
}

impl ClientUi for TerminalUi {
    fn filter(&self) -> RestaurantFilter { self.filter.clone() }
    fn menu_type(&self) -> MenuType { self.menu_type }

    fn alert(&self, message: &str) { self.print(Style::new().yellow().apply_to(message).to_string()); }

    fn prompt(&self, message: &str) -> Option<String> {
        let _ = self.term.write_str(&format!("{message}: "));
        self.term.read_line().ok().filter(|line| !line.is_empty())
    }

    fn render_session(&self, session: &Session) {
        match session {
            Session::LoggedIn(_) => self.print(session.user_info_text()),
            Session::LoggedOut => self.print(Style::new().dim().apply_to("Not logged in").to_string()),
        }
    }

    fn render_restaurants(&self, rows: &[RestaurantRow]) {
        if rows.is_empty() {
            self.print("No restaurants match the filters");
            return;
        }
        self.print(rows.iter().map(render_row).join("\n"));
    }

    fn render_restaurants_error(&self) {
        self.print(Style::new().red().apply_to("Error loading restaurants 😢").to_string());
    }

    fn show_menu(&self, menu: &MenuContent) { self.print(menu.to_display_text()); }
}
