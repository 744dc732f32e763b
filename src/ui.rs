use crate::models::Dataset;
use crate::window;

pub fn render_index(dataset: &Dataset) -> String {
    let config = window::slider_config(dataset);
    let marks = serde_json::to_string(&config.marks).unwrap_or_else(|_| String::from("[]"));
    INDEX_HTML
        .replace("{{MIN_TS}}", &config.min_ts.to_string())
        .replace("{{MAX_TS}}", &config.max_ts.to_string())
        .replace("{{MARKS}}", &marks)
        .replace("{{START_DATE}}", &dataset.start().to_string())
        .replace("{{END_DATE}}", &dataset.end().to_string())
}

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Bikeshare Trends</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
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
      width: min(980px, 100%);
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

    .window-label {
      margin: 0;
      font-size: 1.2rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .slider-card {
      background: white;
      border-radius: 20px;
      padding: 22px 26px 14px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 10px;
    }

    .slider-dates {
      display: flex;
      justify-content: space-between;
      font-size: 0.95rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .slider {
      position: relative;
      height: 44px;
    }

    .slider-track,
    .slider-fill {
      position: absolute;
      top: 50%;
      transform: translateY(-50%);
      height: 6px;
      border-radius: 999px;
    }

    .slider-track {
      left: 0;
      right: 0;
      background: rgba(47, 72, 88, 0.15);
    }

    .slider-fill {
      background: var(--accent);
    }

    .slider input[type="range"] {
      -webkit-appearance: none;
      appearance: none;
      position: absolute;
      top: 50%;
      left: 0;
      transform: translateY(-50%);
      width: 100%;
      margin: 0;
      background: transparent;
      pointer-events: none;
    }

    .slider input[type="range"]::-webkit-slider-thumb {
      -webkit-appearance: none;
      appearance: none;
      pointer-events: auto;
      width: 22px;
      height: 22px;
      border-radius: 50%;
      background: white;
      border: 3px solid var(--accent);
      box-shadow: 0 4px 10px rgba(47, 72, 88, 0.25);
      cursor: grab;
    }

    .slider input[type="range"]::-moz-range-thumb {
      pointer-events: auto;
      width: 18px;
      height: 18px;
      border-radius: 50%;
      background: white;
      border: 3px solid var(--accent);
      box-shadow: 0 4px 10px rgba(47, 72, 88, 0.25);
      cursor: grab;
    }

    .slider-marks {
      position: relative;
      height: 18px;
    }

    .slider-marks span {
      position: absolute;
      transform: translateX(-50%);
      font-size: 11px;
      color: #8b857d;
      white-space: nowrap;
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

    .stat .value.casual {
      color: var(--accent);
    }

    .chart-area {
      display: grid;
      gap: 16px;
    }

    .chart-card {
      background: white;
      border-radius: 20px;
      padding: 16px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 10px;
    }

    .chart-card h2 {
      margin: 0;
      font-size: 1.2rem;
    }

    .chart-card svg {
      width: 100%;
      height: 240px;
      display: block;
    }

    .chart-card svg text {
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
    }

    .chart-line {
      fill: none;
      stroke: var(--accent);
      stroke-width: 2.5;
    }

    .chart-point {
      fill: white;
      stroke: var(--accent);
      stroke-width: 2;
    }

    .chart-bar {
      fill: var(--accent-2);
    }

    .chart-bar-casual {
      fill: var(--accent);
    }

    .chart-bar-registered {
      fill: var(--accent-2);
    }

    .chart-grid {
      stroke: rgba(47, 72, 88, 0.12);
    }

    .chart-label {
      fill: #7a746d;
      font-size: 11px;
    }

    .legend {
      display: flex;
      gap: 18px;
      font-size: 0.9rem;
      color: #6b645d;
    }

    .legend .dot {
      display: inline-block;
      width: 10px;
      height: 10px;
      border-radius: 50%;
      margin-right: 6px;
    }

    .legend .dot.casual {
      background: var(--accent);
    }

    .legend .dot.registered {
      background: var(--accent-2);
    }

    .status {
      font-size: 0.95rem;
      color: #6b645d;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
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
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Bikeshare Trends</h1>
      <p class="subtitle">Drag the handles to pick a date window; the charts recompute as you go.</p>
    </header>

    <section class="slider-card">
      <div class="slider-dates">
        <span id="start-date">{{START_DATE}}</span>
        <span id="end-date">{{END_DATE}}</span>
      </div>
      <div class="slider">
        <div class="slider-track"></div>
        <div class="slider-fill" id="slider-fill"></div>
        <input type="range" id="start-slider" min="{{MIN_TS}}" max="{{MAX_TS}}" step="86400" value="{{MIN_TS}}" aria-label="Window start" />
        <input type="range" id="end-slider" min="{{MIN_TS}}" max="{{MAX_TS}}" step="86400" value="{{MAX_TS}}" aria-label="Window end" />
      </div>
      <div class="slider-marks" id="slider-marks"></div>
    </section>

    <h3 class="window-label" id="window-label">Bikeshare between {{START_DATE}} and {{END_DATE}}</h3>

    <section class="panel">
      <div class="stat">
        <span class="label">Days selected</span>
        <span class="value" id="metric-days">0</span>
      </div>
      <div class="stat">
        <span class="label">Total trips</span>
        <span class="value" id="metric-trips">0</span>
      </div>
      <div class="stat">
        <span class="label">Casual rides</span>
        <span class="value casual" id="metric-casual">0</span>
      </div>
      <div class="stat">
        <span class="label">Registered rides</span>
        <span class="value" id="metric-registered">0</span>
      </div>
    </section>

    <section class="chart-area">
      <div class="chart-card">
        <h2>Bikeshare trends overall</h2>
        <svg id="trend-chart" viewBox="0 0 600 240" aria-label="Daily trips" role="img"></svg>
      </div>
      <div class="chart-card">
        <h2>Weather impact on bikeshare</h2>
        <svg id="weather-chart" viewBox="0 0 600 240" aria-label="Trips by weather" role="img"></svg>
      </div>
      <div class="chart-card">
        <h2>Bikeshare user type per weekday</h2>
        <div class="legend">
          <span><span class="dot casual"></span>Casual</span>
          <span><span class="dot registered"></span>Registered</span>
        </div>
        <svg id="weekday-chart" viewBox="0 0 600 240" aria-label="User types by weekday" role="img"></svg>
      </div>
    </section>

    <div class="status" id="status"></div>
    <p class="hint">Both handles default to the full dataset span. An empty window just draws empty charts.</p>
  </main>

  <script>
    const MIN_TS = {{MIN_TS}};
    const MAX_TS = {{MAX_TS}};
    const MARKS = {{MARKS}};

    const startSlider = document.getElementById('start-slider');
    const endSlider = document.getElementById('end-slider');
    const sliderFill = document.getElementById('slider-fill');
    const sliderMarks = document.getElementById('slider-marks');
    const startDateEl = document.getElementById('start-date');
    const endDateEl = document.getElementById('end-date');
    const windowLabelEl = document.getElementById('window-label');
    const statusEl = document.getElementById('status');
    const trendChart = document.getElementById('trend-chart');
    const weatherChart = document.getElementById('weather-chart');
    const weekdayChart = document.getElementById('weekday-chart');
    const metricDays = document.getElementById('metric-days');
    const metricTrips = document.getElementById('metric-trips');
    const metricCasual = document.getElementById('metric-casual');
    const metricRegistered = document.getElementById('metric-registered');

    const WIDTH = 600;
    const HEIGHT = 240;
    const PAD_X = 48;
    const PAD_Y = 34;
    const TOP = 18;

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const tsToDate = (ts) => new Date(ts * 1000).toISOString().slice(0, 10);

    const percentOf = (ts) =>
      MAX_TS === MIN_TS ? 0 : ((ts - MIN_TS) / (MAX_TS - MIN_TS)) * 100;

    const renderMarks = () => {
      sliderMarks.innerHTML = '';
      MARKS.forEach((mark) => {
        const el = document.createElement('span');
        el.textContent = mark.label;
        el.style.left = percentOf(mark.ts) + '%';
        sliderMarks.appendChild(el);
      });
    };

    const updateSliderChrome = () => {
      const start = Number(startSlider.value);
      const end = Number(endSlider.value);
      sliderFill.style.left = percentOf(start) + '%';
      sliderFill.style.width = Math.max(0, percentOf(end) - percentOf(start)) + '%';
      startDateEl.textContent = tsToDate(start);
      endDateEl.textContent = tsToDate(end);
    };

    const noData = (svg, message) => {
      svg.innerHTML =
        '<text class="chart-label" x="50%" y="50%" text-anchor="middle">' + message + '</text>';
    };

    const gridLines = (maxValue, y) => {
      const ticks = 4;
      let grid = '';
      for (let i = 0; i <= ticks; i += 1) {
        const value = (maxValue * i) / ticks;
        const yPos = y(value);
        grid += '<line class="chart-grid" x1="' + PAD_X + '" y1="' + yPos +
          '" x2="' + (WIDTH - PAD_X) + '" y2="' + yPos + '" />';
        grid += '<text class="chart-label" x="' + (PAD_X - 10) + '" y="' + (yPos + 4) +
          '" text-anchor="end">' + Math.round(value) + '</text>';
      }
      return grid;
    };

    const scaleFor = (maxValue) => {
      const top = maxValue > 0 ? maxValue : 1;
      return (value) => HEIGHT - PAD_Y - ((value / top) * (HEIGHT - TOP - PAD_Y));
    };

    const renderLineChart = (svg, points) => {
      if (!points.length) {
        noData(svg, 'No rides in this window');
        return;
      }

      const max = Math.max(...points.map((p) => p.value));
      const y = scaleFor(max);
      const xStep = points.length > 1 ? (WIDTH - PAD_X * 2) / (points.length - 1) : 0;
      const x = (index) => (points.length > 1 ? PAD_X + index * xStep : WIDTH / 2);

      const path = points
        .map((point, index) =>
          (index === 0 ? 'M ' : 'L ') + x(index).toFixed(2) + ' ' + y(point.value).toFixed(2))
        .join(' ');

      const labelEvery = Math.max(1, Math.ceil(points.length / 8));
      const xLabels = points
        .map((point, index) => {
          if (index % labelEvery !== 0) {
            return '';
          }
          return '<text class="chart-label" x="' + x(index) + '" y="' + (HEIGHT - PAD_Y + 18) +
            '" text-anchor="middle">' + point.label.slice(5) + '</text>';
        })
        .join('');

      const circles = points.length > 120
        ? ''
        : points
            .map((point, index) =>
              '<circle class="chart-point" cx="' + x(index).toFixed(2) + '" cy="' +
              y(point.value).toFixed(2) + '" r="3" />')
            .join('');

      svg.innerHTML = gridLines(max, y) + '<path class="chart-line" d="' + path + '" />' +
        circles + xLabels;
    };

    const renderBarChart = (svg, bars) => {
      if (!bars.length) {
        noData(svg, 'No rides in this window');
        return;
      }

      const max = Math.max(...bars.map((b) => b.value));
      const y = scaleFor(max);
      const slot = (WIDTH - PAD_X * 2) / bars.length;
      const barWidth = Math.min(64, slot * 0.6);

      const rects = bars
        .map((bar, index) => {
          const xPos = PAD_X + index * slot + (slot - barWidth) / 2;
          const yPos = y(bar.value);
          const height = HEIGHT - PAD_Y - yPos;
          return '<rect class="chart-bar" x="' + xPos.toFixed(2) + '" y="' + yPos.toFixed(2) +
            '" width="' + barWidth.toFixed(2) + '" height="' + Math.max(0, height).toFixed(2) +
            '" rx="4" />' +
            '<text class="chart-label" x="' + (PAD_X + index * slot + slot / 2) + '" y="' +
            (HEIGHT - PAD_Y + 18) + '" text-anchor="middle">' + bar.label + '</text>';
        })
        .join('');

      svg.innerHTML = gridLines(max, y) + rects;
    };

    const renderGroupedBarChart = (svg, rows) => {
      if (!rows.length) {
        noData(svg, 'No rides in this window');
        return;
      }

      const max = Math.max(...rows.map((r) => Math.max(r.casual, r.registered)));
      const y = scaleFor(max);
      const slot = (WIDTH - PAD_X * 2) / rows.length;
      const barWidth = Math.min(26, slot * 0.3);

      const rects = rows
        .map((row, index) => {
          const center = PAD_X + index * slot + slot / 2;
          const casualY = y(row.casual);
          const registeredY = y(row.registered);
          return '<rect class="chart-bar-casual" x="' + (center - barWidth - 2).toFixed(2) +
            '" y="' + casualY.toFixed(2) + '" width="' + barWidth.toFixed(2) +
            '" height="' + Math.max(0, HEIGHT - PAD_Y - casualY).toFixed(2) + '" rx="3" />' +
            '<rect class="chart-bar-registered" x="' + (center + 2).toFixed(2) +
            '" y="' + registeredY.toFixed(2) + '" width="' + barWidth.toFixed(2) +
            '" height="' + Math.max(0, HEIGHT - PAD_Y - registeredY).toFixed(2) + '" rx="3" />' +
            '<text class="chart-label" x="' + center + '" y="' + (HEIGHT - PAD_Y + 18) +
            '" text-anchor="middle">' + row.label + '</text>';
        })
        .join('');

      svg.innerHTML = gridLines(max, y) + rects;
    };

    const renderDashboard = (data) => {
      windowLabelEl.textContent = data.label;

      const totalTrips = data.trend.reduce((sum, point) => sum + point.trips, 0);
      const totalCasual = data.weekday.reduce((sum, row) => sum + row.casual, 0);
      const totalRegistered = data.weekday.reduce((sum, row) => sum + row.registered, 0);
      metricDays.textContent = data.trend.length;
      metricTrips.textContent = totalTrips;
      metricCasual.textContent = totalCasual;
      metricRegistered.textContent = totalRegistered;

      renderLineChart(trendChart, data.trend.map((p) => ({ label: p.date, value: p.trips })));
      renderBarChart(weatherChart, data.weather.map((w) => ({ label: w.weather, value: w.trips })));
      renderGroupedBarChart(weekdayChart, data.weekday.map((w) => ({
        label: w.weekday,
        casual: w.casual,
        registered: w.registered
      })));
    };

    const refresh = async () => {
      const start = startSlider.value;
      const end = endSlider.value;
      const res = await fetch('/api/dashboard?start=' + start + '&end=' + end);
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      renderDashboard(await res.json());
      setStatus('', '');
    };

    let refreshTimer = null;
    const scheduleRefresh = () => {
      if (refreshTimer) {
        clearTimeout(refreshTimer);
      }
      refreshTimer = setTimeout(() => {
        refresh().catch((err) => setStatus(err.message, 'error'));
      }, 150);
    };

    startSlider.addEventListener('input', () => {
      if (Number(startSlider.value) > Number(endSlider.value)) {
        startSlider.value = endSlider.value;
      }
      updateSliderChrome();
      scheduleRefresh();
    });

    endSlider.addEventListener('input', () => {
      if (Number(endSlider.value) < Number(startSlider.value)) {
        endSlider.value = startSlider.value;
      }
      updateSliderChrome();
      scheduleRefresh();
    });

    renderMarks();
    updateSliderChrome();
    refresh().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"##;
