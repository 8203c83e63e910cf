use bracket_engine::{
    format::KnockoutSettings,
    placeholder::resolve_placeholders,
    schedule::{IdAllocator, generate_for_team_ids, generate_knockout, group_position_placeholders},
    standings::compute_standings,
    tournament::{Division, Group, Match, Participant, Team, TeamId},
};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::hint::black_box;

/// Helper to create a fully played round-robin for N teams
fn setup_played_group(n_teams: i64) -> (Vec<Team>, Vec<Match>) {
    let teams: Vec<Team> = (1..=n_teams)
        .map(|id| Team::new(id, format!("Team {}", id)))
        .collect();
    let ids: Vec<TeamId> = teams.iter().map(|t| t.id).collect();
    let matches = generate_for_team_ids(&ids, 1)
        .into_iter()
        .enumerate()
        .map(|(i, m)| {
            let id = i as i64 + 1;
            m.into_match(id).finished((id % 4) as i32, (id % 3) as i32)
        })
        .collect();
    (teams, matches)
}

/// Benchmark standings for typical group sizes
fn bench_standings(c: &mut Criterion) {
    let mut group = c.benchmark_group("standings");

    for n_teams in [4, 8, 16].iter() {
        let (teams, matches) = setup_played_group(*n_teams);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_teams", n_teams)),
            &(teams, matches),
            |b, (teams, matches)| {
                b.iter(|| compute_standings(black_box(teams), black_box(matches)));
            },
        );
    }

    group.finish();
}

/// Benchmark round-robin generation
fn bench_round_robin(c: &mut Criterion) {
    let ids: Vec<TeamId> = (1..=20).collect();

    c.bench_function("round_robin_20_teams", |b| {
        b.iter(|| generate_for_team_ids(black_box(&ids), 1));
    });
}

/// Benchmark knockout generation
fn bench_knockout(c: &mut Criterion) {
    let mut group = c.benchmark_group("knockout");
    let settings = KnockoutSettings {
        third_place: true,
        ..KnockoutSettings::default()
    };

    for size in [8i64, 32, 128].iter() {
        let entrants: Vec<Participant> = (1..=*size).map(Participant::Team).collect();
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_entrants", size)),
            &entrants,
            |b, entrants| {
                let mut rng = StdRng::seed_from_u64(1);
                b.iter(|| {
                    let mut ids = IdAllocator::new(1, 1);
                    generate_knockout(black_box(entrants), &settings, &mut ids, &mut rng)
                });
            },
        );
    }

    group.finish();
}

/// Benchmark resolving group winners into a bracket
fn bench_resolution(c: &mut Criterion) {
    let groups: Vec<Group> = (0..8)
        .map(|g| {
            let team_ids = (1..=4).map(|t| g * 10 + t).collect();
            Group::new(g + 1, format!("Group {}", g + 1), team_ids)
        })
        .collect();
    let division = Division::new(1, "Bench", groups.clone());

    let mut matches: Vec<Match> = Vec::new();
    for group in &groups {
        for m in generate_for_team_ids(&group.team_ids, group.id) {
            let id = matches.len() as i64 + 1;
            matches.push(m.into_match(id).finished((id % 3) as i32, (id % 2) as i32));
        }
    }

    let mut ids = IdAllocator::new(10_000, 1);
    let placeholders = group_position_placeholders(&groups, 2, &mut ids).unwrap();
    for (i, pair) in placeholders.chunks(2).enumerate() {
        matches.push(Match::new(
            20_000 + i as i64,
            pair[0].participant(),
            pair[1].participant(),
        ));
    }

    c.bench_function("resolve_8_groups", |b| {
        b.iter(|| {
            let mut placeholders = placeholders.clone();
            let mut matches = matches.clone();
            resolve_placeholders(black_box(&division), &mut placeholders, &mut matches)
        });
    });
}

criterion_group!(tables, bench_standings, bench_round_robin);

criterion_group!(brackets, bench_knockout, bench_resolution);

criterion_main!(tables, brackets);
