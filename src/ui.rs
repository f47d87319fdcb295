use crate::models::{CalendarSnapshot, Cell};

pub fn render_index(calendar: &CalendarSnapshot, streak: u32) -> String {
    let day_value = if calendar.finished {
        "Complete".to_string()
    } else {
        format!("{} / {}", calendar.day_number, calendar.cells.len())
    };

    INDEX_HTML
        .replace("{{DATE}}", &calendar.date.to_string())
        .replace("{{DAY}}", &day_value)
        .replace("{{MISSED}}", &calendar.missed_days.to_string())
        .replace("{{STREAK}}", &streak.to_string())
        .replace("{{CELLS}}", &render_cells(calendar))
}

fn render_cells(calendar: &CalendarSnapshot) -> String {
    let mut cells = String::new();
    for (index, cell) in calendar.cells.iter().enumerate() {
        let mut class = String::from("cell");
        match cell {
            Cell::Checked => class.push_str(" checked"),
            Cell::Missed => class.push_str(" missed"),
            Cell::Empty => {}
        }
        if index == calendar.current_day && !calendar.finished {
            class.push_str(" current");
        }
        cells.push_str(&format!(r#"<div class="{class}">{}</div>"#, index + 1));
    }
    cells
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Login Bonus Calendar</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #e89b3c;
      --accent-2: #2f4858;
      --missed: #c63b2b;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
      animation: rise 600ms ease;
    }

    header {
      display: flex;
      flex-direction: column;
      gap: 6px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    .subtitle {
      margin: 0;
      color: #5f5c57;
      font-size: 1rem;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 8px;
    }

    .stat span {
      display: block;
    }

    .stat .label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .stat .value {
      font-size: 1.7rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .stat .value.streak {
      color: var(--accent);
    }

    .calendar-card {
      background: white;
      border-radius: 20px;
      padding: 20px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 16px;
    }

    .calendar-card h2 {
      margin: 0;
      font-size: 1.4rem;
    }

    .calendar {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 10px;
    }

    .cell {
      aspect-ratio: 1;
      display: grid;
      place-items: center;
      border-radius: 14px;
      background: rgba(47, 72, 88, 0.06);
      border: 1px solid rgba(47, 72, 88, 0.1);
      font-weight: 600;
      font-size: 1.1rem;
      color: #6b645d;
      transition: transform 150ms ease;
    }

    .cell.current {
      border: 2px solid var(--accent);
      color: var(--accent-2);
      transform: scale(1.04);
    }

    .cell.checked {
      background: var(--accent);
      border-color: var(--accent);
      color: white;
      box-shadow: 0 8px 18px rgba(232, 155, 60, 0.35);
    }

    .cell.missed {
      background: rgba(198, 59, 43, 0.1);
      border-color: rgba(198, 59, 43, 0.25);
      color: var(--missed);
      text-decoration: line-through;
    }

    .actions {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 16px;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 16px 20px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      transition: transform 150ms ease, box-shadow 150ms ease;
      display: inline-flex;
      align-items: center;
      justify-content: center;
      gap: 10px;
    }

    button:active {
      transform: scale(0.98);
    }

    .btn-claim {
      background: var(--accent);
      color: white;
      box-shadow: 0 10px 24px rgba(232, 155, 60, 0.3);
    }

    .btn-advance {
      background: var(--accent-2);
      color: white;
      box-shadow: 0 10px 24px rgba(47, 72, 88, 0.3);
    }

    .btn-reset {
      background: rgba(47, 72, 88, 0.08);
      color: var(--accent-2);
    }

    .status {
      font-size: 0.95rem;
      color: #6b645d;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .status[data-type="ok"] {
      color: #2d7a4b;
    }

    .hint {
      margin: 0;
      color: #6f6a65;
      font-size: 0.9rem;
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(18px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }

    @media (max-width: 600px) {
      .app {
        padding: 28px 22px;
      }
      button {
        width: 100%;
      }
      .calendar {
        grid-template-columns: repeat(7, minmax(0, 1fr));
        gap: 6px;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Login Bonus Calendar</h1>
      <p class="subtitle">Claim one gift per day across the 14-day cycle. Days you skip are gone for good.</p>
    </header>

    <section class="panel">
      <div class="stat">
        <span class="label">Date</span>
        <span id="date" class="value">{{DATE}}</span>
      </div>
      <div class="stat">
        <span class="label">Day</span>
        <span id="day" class="value">{{DAY}}</span>
      </div>
      <div class="stat">
        <span class="label">Missed</span>
        <span id="missed" class="value">{{MISSED}}</span>
      </div>
      <div class="stat">
        <span class="label">Streak</span>
        <span id="streak" class="value streak">{{STREAK}}</span>
      </div>
    </section>

    <section class="calendar-card">
      <h2>This cycle</h2>
      <div id="calendar" class="calendar">{{CELLS}}</div>
    </section>

    <section class="actions">
      <button class="btn-claim" id="claim-btn" type="button">Claim today's gift</button>
      <button class="btn-advance" id="advance-btn" type="button">Skip a day</button>
      <button class="btn-reset" id="reset-btn" type="button">Start over</button>
    </section>

    <div class="status" id="status"></div>
    <p class="hint">Your visit is recorded once per calendar day (server time). The streak counts consecutive visit days.</p>
  </main>

  <script>
    const dateEl = document.getElementById('date');
    const dayEl = document.getElementById('day');
    const missedEl = document.getElementById('missed');
    const streakEl = document.getElementById('streak');
    const statusEl = document.getElementById('status');
    const calendarEl = document.getElementById('calendar');
    const claimBtn = document.getElementById('claim-btn');
    const advanceBtn = document.getElementById('advance-btn');
    const resetBtn = document.getElementById('reset-btn');

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const renderCells = (calendar) => {
      calendarEl.innerHTML = calendar.cells
        .map((cell, index) => {
          let cls = 'cell';
          if (cell === 'checked') {
            cls += ' checked';
          }
          if (cell === 'missed') {
            cls += ' missed';
          }
          if (index === calendar.current_day && !calendar.finished) {
            cls += ' current';
          }
          return `<div class="${cls}">${index + 1}</div>`;
        })
        .join('');
    };

    const updateCalendar = (calendar) => {
      dateEl.textContent = calendar.date;
      dayEl.textContent = calendar.finished
        ? 'Complete'
        : `${calendar.day_number} / ${calendar.cells.length}`;
      missedEl.textContent = calendar.missed_days;
      renderCells(calendar);
    };

    const loadCalendar = async () => {
      const res = await fetch('/api/calendar');
      if (!res.ok) {
        throw new Error('Unable to load calendar');
      }
      updateCalendar(await res.json());
    };

    const loadStreak = async () => {
      const res = await fetch('/api/streak');
      if (!res.ok) {
        throw new Error('Unable to load streak');
      }
      const data = await res.json();
      streakEl.textContent = data.streak;
    };

    const recordVisit = async () => {
      const res = await fetch('/api/dates', { method: 'POST' });
      if (!res.ok) {
        throw new Error('Unable to record this visit');
      }
    };

    const refresh = async () => {
      await Promise.all([loadCalendar(), loadStreak()]);
    };

    const claimMessage = (data) => {
      if (data.status === 'already_logged_today') {
        return 'Already claimed today. Come back tomorrow.';
      }
      if (data.status === 'completed') {
        return 'Cycle complete! Every gift claimed.';
      }
      if (data.status === 'restarted') {
        return 'New cycle started. Day 1 claimed.';
      }
      if (data.days_missed > 0) {
        return `Day ${data.day_number} claimed. ${data.days_missed} day(s) slipped away.`;
      }
      return `Day ${data.day_number} claimed.`;
    };

    const post = async (url) => {
      const res = await fetch(url, { method: 'POST' });
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      return res.json();
    };

    const claim = async () => {
      setStatus('Claiming...', 'info');
      const data = await post('/api/calendar/login');
      updateCalendar(data.calendar);
      setStatus(claimMessage(data), data.saved ? 'ok' : 'error');
    };

    const advance = async () => {
      const data = await post('/api/calendar/advance');
      updateCalendar(data.calendar);
      if (data.status === 'at_cycle_end') {
        setStatus('Already at the last day of the cycle.', '');
      } else {
        setStatus(`Moved to day ${data.calendar.day_number}.`, 'ok');
      }
    };

    const reset = async () => {
      const data = await post('/api/calendar/reset');
      updateCalendar(data.calendar);
      setStatus('Calendar reset.', data.saved ? 'ok' : 'error');
    };

    claimBtn.addEventListener('click', () => {
      claim().catch((err) => setStatus(err.message, 'error'));
    });

    advanceBtn.addEventListener('click', () => {
      advance().catch((err) => setStatus(err.message, 'error'));
    });

    resetBtn.addEventListener('click', () => {
      reset().catch((err) => setStatus(err.message, 'error'));
    });

    const init = async () => {
      try {
        await recordVisit();
      } catch (err) {
        setStatus(err.message, 'error');
      }
      await refresh();
    };

    init().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
