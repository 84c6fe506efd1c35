//! Gaming and esports sites: leaderboard state, sorting and tournament sign-up.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use siteforge_core::{Artifact, Requirements, Section};

use super::blueprint::{Item, PageBlueprint, Palette, SectionCopy};
use super::render::{APP_IMPORTS, SHARED_COMPONENTS, assemble_with, fill, js_literal};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Player {
    name: &'static str,
    wins: u32,
    played: u32,
    points: u32,
}

const PLAYERS: &[Player] = &[
    Player {
        name: "NovaStrike",
        wins: 18,
        played: 24,
        points: 54,
    },
    Player {
        name: "PixelWarden",
        wins: 15,
        played: 22,
        points: 47,
    },
    Player {
        name: "EchoFox",
        wins: 14,
        played: 23,
        points: 44,
    },
    Player {
        name: "Grimlock",
        wins: 11,
        played: 20,
        points: 35,
    },
    Player {
        name: "Valkyrie",
        wins: 9,
        played: 19,
        points: 29,
    },
    Player {
        name: "Bytewolf",
        wins: 6,
        played: 17,
        points: 20,
    },
];

#[derive(Debug, Serialize)]
struct Tournament {
    name: &'static str,
    date: &'static str,
    format: &'static str,
    slots: u32,
}

const TOURNAMENTS: &[Tournament] = &[
    Tournament {
        name: "Weekend Clash",
        date: "Saturdays, 18:00 UTC",
        format: "Single elimination",
        slots: 32,
    },
    Tournament {
        name: "Monthly Major",
        date: "Last Sunday, 16:00 UTC",
        format: "Double elimination",
        slots: 64,
    },
    Tournament {
        name: "Rookie Cup",
        date: "Wednesdays, 19:00 UTC",
        format: "Swiss, 5 rounds",
        slots: 16,
    },
];

const GAME_APP: &str = r##"
const BRAND = __BRAND__;
const TAGLINE = __TAGLINE__;
const PRIZE_POOL = __PRIZE_POOL__;
const TOURNAMENTS = __TOURNAMENTS__;
const INITIAL_PLAYERS = __PLAYERS__;
const SECTIONS = __SECTIONS__;

const SORT_KEYS = [
  { key: 'points', label: 'Points' },
  { key: 'wins', label: 'Wins' },
  { key: 'winRate', label: 'Win rate' },
];

function rankPlayers(players, sortKey) {
  return players
    .map((player) => ({
      ...player,
      winRate: Math.round((player.wins / Math.max(player.played, 1)) * 100),
    }))
    .sort((a, b) => b[sortKey] - a[sortKey] || a.name.localeCompare(b.name));
}

function Leaderboard() {
  const [players, setPlayers] = useState(INITIAL_PLAYERS);
  const [sortKey, setSortKey] = useState('points');
  const [query, setQuery] = useState('');

  const ranked = rankPlayers(players, sortKey);
  const visible = ranked.filter((player) =>
    player.name.toLowerCase().includes(query.trim().toLowerCase())
  );

  const recordWin = (name) =>
    setPlayers((current) =>
      current.map((player) =>
        player.name === name
          ? { ...player, wins: player.wins + 1, played: player.played + 1, points: player.points + 3 }
          : player
      )
    );

  return (
    <section id="leaderboard" className="section" aria-labelledby="leaderboard-title">
      <h2 id="leaderboard-title">Leaderboard</h2>
      <div className="leaderboard__controls">
        <label htmlFor="player-search" className="sr-only">
          Search players
        </label>
        <input
          id="player-search"
          placeholder="Search players"
          value={query}
          onChange={(event) => setQuery(event.target.value)}
        />
        <div role="group" aria-label="Sort leaderboard">
          {SORT_KEYS.map(({ key, label }) => (
            <button
              key={key}
              className={key === sortKey ? 'chip chip--active' : 'chip'}
              aria-pressed={key === sortKey}
              onClick={() => setSortKey(key)}
            >
              {label}
            </button>
          ))}
        </div>
      </div>
      <table className="leaderboard">
        <thead>
          <tr>
            <th scope="col">Rank</th>
            <th scope="col">Player</th>
            <th scope="col">Wins</th>
            <th scope="col">Win rate</th>
            <th scope="col">Points</th>
            <th scope="col">
              <span className="sr-only">Actions</span>
            </th>
          </tr>
        </thead>
        <tbody>
          {visible.map((player) => {
            const rank = ranked.indexOf(player) + 1;
            return (
              <tr
                key={player.name}
                className={rank <= 3 ? 'leaderboard__row leaderboard__row--podium' : 'leaderboard__row'}
              >
                <td>#{rank}</td>
                <td>{player.name}</td>
                <td>{player.wins}</td>
                <td>{player.winRate}%</td>
                <td>{player.points}</td>
                <td>
                  <button className="chip" onClick={() => recordWin(player.name)}>
                    + Win
                  </button>
                </td>
              </tr>
            );
          })}
        </tbody>
      </table>
      {visible.length === 0 && <p role="status">No players match "{query}".</p>}
    </section>
  );
}

function Tournaments() {
  const [joined, setJoined] = useState([]);
  const toggle = (name) =>
    setJoined((current) =>
      current.includes(name) ? current.filter((entry) => entry !== name) : [...current, name]
    );

  return (
    <section id="tournaments" className="section" aria-labelledby="tournaments-title">
      <h2 id="tournaments-title">Tournaments</h2>
      <div className="grid">
        {TOURNAMENTS.map((tournament) => {
          const isJoined = joined.includes(tournament.name);
          return (
            <article key={tournament.name} className="card">
              <h3>{tournament.name}</h3>
              <p>{tournament.date}</p>
              <p>
                {tournament.format} &middot; {tournament.slots} slots
              </p>
              <button className="button" aria-pressed={isJoined} onClick={() => toggle(tournament.name)}>
                {isJoined ? 'Registered' : 'Register'}
              </button>
            </article>
          );
        })}
      </div>
    </section>
  );
}
__SHARED__
export default function App() {
  return (
    <>
      <Nav />
      <main id="top">
        <section className="hero hero--arena" aria-label="Introduction">
          <h1>{BRAND}</h1>
          <p className="hero__tagline">{TAGLINE}</p>
          {PRIZE_POOL && (
            <p className="hero__prize">
              Prize pool: <strong>{PRIZE_POOL}</strong>
            </p>
          )}
          <a className="button" href="#tournaments">
            Join a tournament
          </a>
        </section>
        {SECTIONS.map((section) => {
          if (section.id === 'leaderboard') {
            return <Leaderboard key={section.id} />;
          }
          if (section.id === 'tournaments') {
            return <Tournaments key={section.id} />;
          }
          return <Section key={section.id} section={section} />;
        })}
      </main>
      <Footer />
    </>
  );
}
"##;

const GAME_CSS: &str = r".hero--arena {
  background: radial-gradient(circle at top, var(--color-accent-soft), var(--color-bg) 70%);
}

.hero__prize strong {
  color: var(--color-accent);
  font-size: 1.5rem;
}

.leaderboard__controls {
  display: flex;
  flex-wrap: wrap;
  gap: 1rem;
  justify-content: space-between;
  margin-bottom: 1rem;
}

.leaderboard {
  width: 100%;
  border-collapse: collapse;
}

.leaderboard th,
.leaderboard td {
  padding: 0.75rem;
  text-align: left;
  border-bottom: 1px solid var(--color-surface);
}

.leaderboard__row {
  transition: background-color 0.2s ease;
}

.leaderboard__row:hover {
  background: var(--color-surface);
}

.leaderboard__row--podium td:first-child {
  font-weight: 700;
  color: var(--color-accent);
}

.chip {
  padding: 0.35rem 0.85rem;
  border: 1px solid var(--color-accent);
  border-radius: 999px;
  background: transparent;
  color: var(--color-text);
  font: inherit;
  cursor: pointer;
  transition: background-color 0.2s ease;
}

.chip--active {
  background: var(--color-accent);
  color: var(--color-bg);
}
";

/// Build the blueprint and render a site with a live leaderboard.
pub fn render(requirements: &Requirements, brand: &str, user_text: &str) -> Artifact {
    let mut blueprint = PageBlueprint::new(
        brand,
        "Compete, climb the ranks, claim the prize.",
        Palette::NEON,
    )
    .description(format!(
        "{brand}: {} tournaments, live leaderboard and community for {}.",
        requirements.industry, requirements.audience
    ))
    .cta("Join a tournament")
    .with_sections(requirements, |section| match section {
        Section::Features => Some(
            SectionCopy::new(section, "Why play here", "Fair matches, fast payouts.").items([
                Item::new("Skill-based seeding", "Brackets balanced by rating."),
                Item::new("Live standings", "The leaderboard updates after every match."),
                Item::new("Anti-cheat", "Every result is reviewed."),
            ]),
        ),
        _ => None,
    });
    ensure_arena_sections(&mut blueprint, requirements);

    let prize_pool = prize_pool(user_text);
    let app = fill(
        GAME_APP,
        &[
            ("BRAND", js_literal(&blueprint.brand)),
            ("TAGLINE", js_literal(&blueprint.tagline)),
            ("PRIZE_POOL", js_literal(&prize_pool)),
            ("TOURNAMENTS", js_literal(TOURNAMENTS)),
            ("PLAYERS", js_literal(PLAYERS)),
            ("SECTIONS", js_literal(&blueprint.sections)),
            ("SHARED", SHARED_COMPONENTS.to_string()),
        ],
    );
    assemble_with(&blueprint, format!("{APP_IMPORTS}{app}"), GAME_CSS)
}

/// Tournaments and the leaderboard are always part of a game site.
fn ensure_arena_sections(blueprint: &mut PageBlueprint, requirements: &Requirements) {
    for section in [Section::Tournaments, Section::Leaderboard] {
        if !blueprint.sections.iter().any(|s| s.id == section.as_str()) {
            blueprint
                .sections
                .push(super::blueprint::generic_copy(section, requirements));
        }
    }
    blueprint
        .sections
        .sort_by_key(|copy| Section::ALL.iter().position(|s| s.as_str() == copy.id));
}

/// Prize pool amount mentioned in the request, formatted as `$50,000`.
fn prize_pool(user_text: &str) -> Option<String> {
    static PRIZE_RE: OnceLock<Option<Regex>> = OnceLock::new();
    let re = PRIZE_RE
        .get_or_init(|| {
            Regex::new(
                r"(?i)(?:prize\s+pool\s+of\s+\$?(\d[\d,]*)|\$?(\d[\d,]*)\s*(?:usd\s+|dollars?\s+)?prize\s+pool)",
            )
            .ok()
        })
        .as_ref()?;
    let caps = re.captures(user_text)?;
    let digits: String = caps
        .get(1)
        .or_else(|| caps.get(2))?
        .as_str()
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    let amount: u64 = digits.parse().ok()?;
    Some(format!("${}", group_thousands(amount)))
}

fn group_thousands(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
