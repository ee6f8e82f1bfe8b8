// End-to-end run over a small archive + current games extract

use std::fs;
use std::path::Path;

use olympic_reconciliation::{
    AthleteIdentity, EventResultRow, GameEdition, Pipeline, PipelineConfig, TallyEntry,
};
use tempfile::TempDir;

const GAMES: &str = "\
edition,edition_id,edition_url,year,city,country_flag_url,country_noc,start_date,end_date,competition_date,isHeld
1908 Summer Olympics,5,/editions/5,1908,London,,GBR,13 July,25 July,27 April – 31 October,
1916 Summer Olympics,7,/editions/7,1916,Berlin,,GER,,,—,Not held due to war
2024 Summer Olympics,63,/editions/63,2024,Paris,,FRA,,,—,
";

const COUNTRIES: &str = "\
noc,country
ANZ,Australasia
GBR,Great Britain
FRA,France
";

const RESULTS: &str = "\
edition,edition_id,country_noc,sport,event,result_id,athlete,athlete_id,pos,medal,isTeamSport
1908 Summer Olympics,5,ANZ,Athletics,\"100 metres, Men\",56265,Ernest Hutcheon,64710,DNS,,False
1908 Summer Olympics,5,GBR,Athletics,\"3 Miles Team Race, Men\",56400,Joe Deakin,70000,1,Gold,True
1908 Summer Olympics,5,GBR,Athletics,\"3 Miles Team Race, Men\",56400,Archie Robertson,70001,1,Gold,True
";

const ATHLETES: &str = "\
athlete_id,name,sex,born,height,weight,country,country_noc
64710,Ernest Hutcheon,Male,24-Nov-1873,,,Australasia,ANZ
70000,Joe Deakin,Male,6 February 1879,,,Great Britain,GBR
70001,Archie Robertson,Male,1879,,,Great Britain,GBR
1000,Teddy Riner,Male,1989-04-07,204,140,France,FRA
";

const NEW_ATHLETES: &str = "\
code,name,name_tv,gender,birth_date,height,weight,country_code,country_long,nationality_code,disciplines,events
1,RINER Teddy,Teddy RINER,Male,1989-04-07,204,140,FRA,France,FRA,['Judo'],\"['Men +100 kg', 'Mixed Team']\"
2,SMITH Ana,,Female,2000-01-15,0,0,FRA,France,FRA,['Judo'],['Mixed Team']
3,NOVAK Ivan,Ivan NOVAK,Male,1995-05-05,0,0,AIN,AIN,AIN,['Judo'],['Men -90 kg']
";

const MEDALLISTS: &str = "\
medal_type,name,code_athlete,discipline,event
Gold Medal,RINER Teddy,1,Judo,Men +100 kg
Gold Medal,RINER Teddy,1,Judo,Mixed Team
Gold Medal,SMITH Ana,2,Judo,Mixed Team
Bronze Medal,NOVAK Ivan,3,Judo,Men -90 kg
";

const TEAMS: &str = "\
code,team,discipline,events,athletes_codes
JUDXTEAM---FRA,France,Judo,Mixed Team,\"['1', '2']\"
";

const EVENTS: &str = "\
sport,event
Judo,Men +100 kg
Judo,Mixed Team
";

const NOCS: &str = "\
code,country,country_long
FRA,France,France
AIN,AIN,Individual Neutral Athletes
";

fn write_fixture(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn setup() -> (TempDir, PipelineConfig) {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("data");
    let config = PipelineConfig::default()
        .with_data_dir(data.clone())
        .with_output_dir(dir.path().join("out"));

    let inputs = &config.inputs;
    write_fixture(&data, &inputs.games, GAMES);
    write_fixture(&data, &inputs.countries, COUNTRIES);
    write_fixture(&data, &inputs.event_results, RESULTS);
    write_fixture(&data, &inputs.athletes, ATHLETES);
    write_fixture(&data, &inputs.new_athletes, NEW_ATHLETES);
    write_fixture(&data, &inputs.new_medallists, MEDALLISTS);
    write_fixture(&data, &inputs.new_teams, TEAMS);
    write_fixture(&data, &inputs.new_events, EVENTS);
    write_fixture(&data, &inputs.new_nocs, NOCS);

    (dir, config)
}

fn read_back<T: serde::de::DeserializeOwned>(path: &Path) -> Vec<T> {
    let mut reader = csv::Reader::from_path(path).unwrap();
    reader.deserialize().collect::<Result<_, _>>().unwrap()
}

#[test]
fn test_run_reports_summary() {
    let (_dir, config) = setup();

    let summary = olympic_reconciliation::pipeline::run(&config).unwrap();

    assert_eq!(summary.editions, 3);
    assert_eq!(summary.historical_rows, 3);
    assert_eq!(summary.new_athletes, 3);
    assert_eq!(summary.identities_minted, 2);
    assert_eq!(summary.rows_merged, 3);
    assert_eq!(summary.rows_gap_filled, 1);
    assert_eq!(summary.result_ids_assigned, 2);
    assert_eq!(summary.tally_entries, 4);
}

#[test]
fn test_event_results_output() {
    let (_dir, config) = setup();
    Pipeline::new(config.clone()).run().unwrap();

    let rows: Vec<EventResultRow> =
        read_back(&config.output_path(&config.outputs.event_results));
    assert_eq!(rows.len(), 7);

    // Archive rows come first, now with ages
    assert_eq!(rows[0].athlete, "Ernest Hutcheon");
    assert_eq!(rows[0].age, Some(34));
    assert_eq!(rows[1].age, Some(29));
    assert_eq!(rows[2].age, Some(29));

    // Matched archive athlete keeps their id; result ids continue from the archive max
    let riner: Vec<&EventResultRow> = rows.iter().filter(|r| r.athlete == "Teddy Riner").collect();
    assert_eq!(riner.len(), 2);
    assert!(riner.iter().all(|r| r.athlete_id == 1000 && r.age == Some(35)));
    assert_eq!(riner[0].result_id, Some(56401));
    assert_eq!(riner[1].result_id, Some(56402));
    assert!(riner[1].is_team_sport);

    let smith = &rows[5];
    assert_eq!(smith.athlete, "Ana Smith");
    assert_eq!(smith.athlete_id, 70002);
    assert_eq!(smith.result_id, Some(56402));
    assert_eq!(smith.medal, "Gold");

    // Event outside the catalog only arrives through the medal gap fill
    let novak = &rows[6];
    assert_eq!(novak.athlete, "Ivan Novak");
    assert_eq!(novak.athlete_id, 70003);
    assert_eq!(novak.result_id, None);
    assert_eq!(novak.medal, "Bronze");
    assert_eq!(novak.pos, "3");
    assert_eq!(novak.age, Some(29));
}

#[test]
fn test_tally_output() {
    let (_dir, config) = setup();
    Pipeline::new(config.clone()).run().unwrap();

    let tally: Vec<TallyEntry> = read_back(&config.output_path(&config.outputs.tally));
    let nocs: Vec<&str> = tally.iter().map(|t| t.noc.as_str()).collect();
    assert_eq!(nocs, vec!["ANZ", "GBR", "FRA", "AIN"]);

    let gbr = &tally[1];
    assert_eq!(gbr.country, "Great Britain");
    assert_eq!(gbr.number_of_athletes, 2);
    assert_eq!(gbr.gold_medal_count, 1);
    assert_eq!(gbr.total_medals, 1);

    let fra = &tally[2];
    assert_eq!(fra.edition_id, "63");
    assert_eq!(fra.number_of_athletes, 2);
    assert_eq!(fra.gold_medal_count, 2);
    assert_eq!(fra.total_medals, 2);

    let ain = &tally[3];
    assert_eq!(ain.country, "Individual Neutral Athletes");
    assert_eq!(ain.bronze_medal_count, 1);
}

#[test]
fn test_athlete_and_games_output() {
    let (_dir, config) = setup();
    Pipeline::new(config.clone()).run().unwrap();

    let athletes: Vec<AthleteIdentity> = read_back(&config.output_path(&config.outputs.athletes));
    let ids: Vec<u64> = athletes.iter().map(|a| a.athlete_id).collect();
    assert_eq!(ids, vec![64710, 70000, 70001, 1000, 70002, 70003]);
    assert_eq!(athletes[1].born, "06-Feb-1879");
    assert_eq!(athletes[2].born, "01-Jan-1879");
    assert_eq!(athletes[3].born, "07-Apr-1989");
    assert_eq!(athletes[4].name, "Ana Smith");
    assert_eq!(athletes[4].born, "15-Jan-2000");

    let games: Vec<GameEdition> = read_back(&config.output_path(&config.outputs.games));
    assert_eq!(games.len(), 3);
    assert_eq!(games[0].competition_date, "27-Apr-1908 to 31-Oct-1908");
    assert_eq!(games[1].start_date, "");
    assert_eq!(games[2].start_date, "26-Jul-2024");
    assert_eq!(games[2].competition_date, "24-Jul-2024 to 11-Aug-2024");
}

#[test]
fn test_missing_input_is_reported() {
    let (dir, config) = setup();
    fs::remove_file(dir.path().join("data").join(&config.inputs.new_medallists)).unwrap();

    let err = Pipeline::new(config).run().unwrap_err();

    assert!(format!("{:#}", err).contains("medallists.csv"));
}
