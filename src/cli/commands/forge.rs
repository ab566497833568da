//! Sample data command handler

use crate::config::Config;
use crate::db::Store;
use crate::models::MovieInput;

const OWNER_NAME: &str = "Grey Li";

const SAMPLE_MOVIES: &[(&str, &str, bool)] = &[
    ("My Neighbor Totoro", "1988", false),
    ("Dead Poets Society", "1989", false),
    ("A Perfect World", "1993", false),
    ("Leon", "1994", false),
    ("Mahjong", "1996", false),
    ("Swallowtail Butterfly", "1996", false),
    ("King of Comedy", "1999", false),
    ("Devils on the Doorstep", "1999", false),
    ("WALL-E", "2008", false),
    ("The Pork of Music", "2012", false),
    ("头号玩家", "2018", true),
    ("流浪地球1", "2012", false),
    ("流浪地球2", "2023", true),
    ("暮光之城", "2008", false),
    ("横空出世", "1999", false),
    ("让子弹飞", "2010", false),
    ("战狼", "2015", false),
    ("战狼2", "2017", false),
    ("蜘蛛侠:纵横宇宙", "2023", false),
    ("天空之城", "1986", false),
    ("银河护卫队3", "2023", false),
    ("肖申克的救赎", "1994", false),
    ("阿甘正传", "1994", false),
];

fn sample_movies() -> Vec<MovieInput> {
    SAMPLE_MOVIES
        .iter()
        .map(|&(title, year, is_read)| MovieInput {
            title: title.to_string(),
            year: year.to_string(),
            is_read,
        })
        .collect()
}

pub async fn cmd_forge(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    let inserted = store.create_movies(&sample_movies()).await?;
    println!("Inserted {inserted} movies.");

    match store.get_first_user().await? {
        Some(user) => {
            store.update_user_name(user.id, OWNER_NAME).await?;
            println!("Renamed user '{}' to '{OWNER_NAME}'.", user.username);
        }
        None => println!("No user found, run 'watchlist admin' to create one."),
    }

    println!("Done.");
    Ok(())
}
