use chrono::{Days, Local};
use std::{env, time::Duration};
use tracing_subscriber::EnvFilter;
use trip_planner_app::{pages::View, App, AppConfig, SearchForm};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().unwrap();
    let app = App::builder(config).build();

    let email = env::var("TRIP_PLANNER_EMAIL").unwrap();
    let password = env::var("TRIP_PLANNER_PASSWORD").unwrap();
    let destination = env::var("TRIP_PLANNER_DESTINATION").unwrap_or_else(|_| "Lisbon".into());

    let next = app.login(&email, &password).await.unwrap();
    println!("signed in as {:?}, going to {next}", app.session().auth_user());

    app.suggestions().on_input(&destination);
    tokio::time::sleep(app.config().debounce + Duration::from_secs(1)).await;
    let suggestions = app.suggestions().suggestions();
    println!("suggestions: {suggestions:#?}");

    let start = Local::now().date_naive() + Days::new(14);
    let mut form = SearchForm::new()
        .with_destination(suggestions.first().cloned().unwrap_or(destination))
        .with_dates(start, start + Days::new(2));
    form.toggle_tag("Hidden Gems");
    form.toggle_tag("Photography Spots");

    let next = app.search().submit(&form).await.unwrap();
    let screen = app.navigate(&next.path()).await;

    if let View::Timeline(Some(timeline)) = screen.view {
        println!("{} ({} - {})", timeline.name, timeline.start, timeline.end);
        for day in timeline.days {
            println!("Day {}", day.day);
            for item in day.items {
                println!("  {} {}: {}", item.title, item.card_title, item.card_subtitle);
            }
        }
    }
}
