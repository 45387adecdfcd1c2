//! Text templates for the enhancer and the Web UI page

/// Instruction wrapping the drafted prompt for the remote model
/// Contains placeholder for original prompt only
pub const ENHANCE_INSTRUCTION_TEMPLATE: &str = r#"You are an expert prompt engineer. Please enhance the following prompt to make it more effective for AI models. The prompt is: "{original_prompt}""#;

/// Sentence appended to the draft when no remote enhancement is available
pub const FALLBACK_SUFFIX: &str = "Please provide a detailed and well-structured response. Include relevant examples and consider different perspectives where appropriate.";

/// Advisory shown when the remote service could not be used
pub const ADVISORY_UNAVAILABLE: &str =
    "Could not connect to AI service. Using basic prompt instead.";

/// Advisory shown when generation itself failed
pub const ADVISORY_FAILED: &str =
    "An error occurred while generating the prompt. Please try again.";

/// Web UI HTML template for the prompt form
pub const FORM_UI_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>PromptCraft</title>
  <style>
    * { margin: 0; padding: 0; box-sizing: border-box; }

    body {
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Roboto', 'Helvetica Neue', sans-serif;
      background: #f5f5f5;
      min-height: 100vh;
      padding: 20px;
      display: flex;
      justify-content: center;
      color: #333;
    }

    .container {
      background: white;
      border-radius: 8px;
      box-shadow: 0 2px 8px rgba(0, 0, 0, 0.1);
      border: 1px solid #e0e0e0;
      max-width: 900px;
      width: 100%;
      overflow: hidden;
    }

    .header {
      padding: 30px;
      text-align: center;
      border-bottom: 1px solid #e0e0e0;
    }

    .header h1 { font-size: 24px; font-weight: 600; margin-bottom: 8px; }
    .header p { font-size: 14px; color: #666; }

    .content { padding: 30px; }

    .levels { display: flex; gap: 10px; margin-bottom: 20px; flex-wrap: wrap; }

    .level {
      flex: 1;
      min-width: 160px;
      border: 1px solid #ddd;
      border-radius: 6px;
      padding: 12px;
      cursor: pointer;
      background: #fafafa;
    }

    .level.selected { border-color: #333; background: #fff; }
    .level h3 { font-size: 15px; margin-bottom: 4px; }
    .level p { font-size: 12px; color: #666; }

    .recommendations { font-size: 13px; color: #555; margin: 0 0 20px 20px; }

    label { display: block; font-size: 13px; font-weight: 600; margin: 14px 0 6px; }

    input, textarea {
      width: 100%;
      padding: 10px;
      border: 1px solid #ddd;
      border-radius: 6px;
      font-family: inherit;
      font-size: 14px;
    }

    textarea { min-height: 90px; resize: vertical; }

    .hidden { display: none; }

    button {
      margin-top: 20px;
      padding: 10px 20px;
      border: 1px solid #333;
      border-radius: 6px;
      background: #333;
      color: white;
      font-size: 14px;
      cursor: pointer;
    }

    button.secondary { background: white; color: #333; margin-left: 8px; }
    button:disabled { opacity: 0.5; cursor: not-allowed; }

    .advisory {
      margin-top: 20px;
      padding: 12px;
      border-radius: 6px;
      background: #f8d7da;
      color: #721c24;
      font-size: 14px;
    }

    .result { margin-top: 25px; }

    .result pre {
      white-space: pre-wrap;
      background: #f8f8f8;
      border: 1px solid #e0e0e0;
      border-radius: 6px;
      padding: 15px;
      font-size: 14px;
    }

    .badge { display: inline-block; margin-top: 10px; font-size: 12px; color: #666; }
  </style>
</head>
<body>
  <div class="container">
    <div class="header">
      <h1>PromptCraft</h1>
      <p>Design prompts with a multi-level prompt engineering framework.</p>
    </div>
    <div class="content">
      <div class="levels" id="levels"></div>
      <ul class="recommendations" id="recommendations"></ul>

      <form id="form">
        <div data-field="topic">
          <label for="topic">Main Topic or Question *</label>
          <input id="topic" placeholder="What do you want the AI to address?" required>
        </div>
        <div data-field="context">
          <label for="context">Context</label>
          <textarea id="context" placeholder="Provide relevant background information or context"></textarea>
        </div>
        <div data-field="requirements">
          <label for="requirements">Requirements</label>
          <textarea id="requirements" placeholder="What specific requirements, format, or constraints should the AI follow?"></textarea>
        </div>
        <div data-field="audience">
          <label for="audience">Target Audience</label>
          <input id="audience" placeholder="Who is the intended audience for this content?">
        </div>
        <div data-field="tone">
          <label for="tone">Tone</label>
          <input id="tone" placeholder="What tone or style should the AI use? (e.g., professional, casual, technical)">
        </div>
        <button type="submit" id="generate">Generate Prompt</button>
      </form>

      <div class="advisory hidden" id="advisory"></div>

      <div class="result hidden" id="result">
        <pre id="prompt"></pre>
        <span class="badge" id="badge"></span>
        <div>
          <button type="button" class="secondary" id="copy">Copy</button>
          <button type="button" class="secondary" id="download">Download</button>
          <button type="button" class="secondary" id="save">Save to export folder</button>
        </div>
      </div>
    </div>
  </div>

  <script>
    const FIELDS = ['topic', 'context', 'requirements', 'audience', 'tone'];
    let levels = [];
    let current = 'basic';

    async function api(path, options) {
      const resp = await fetch(path, options);
      const data = await resp.json().catch(() => ({}));
      if (!resp.ok) throw new Error(data.error || resp.statusText);
      return data;
    }

    function renderLevels() {
      const root = document.getElementById('levels');
      root.innerHTML = '';
      for (const level of levels) {
        const el = document.createElement('div');
        el.className = 'level' + (level.id === current ? ' selected' : '');
        el.innerHTML = '<h3></h3><p></p>';
        el.querySelector('h3').textContent = level.name;
        el.querySelector('p').textContent = level.description;
        el.onclick = () => selectLevel(level.id);
        root.appendChild(el);
      }

      const info = levels.find(l => l.id === current);
      const recs = document.getElementById('recommendations');
      recs.innerHTML = '';
      for (const rec of (info ? info.recommendations : [])) {
        const li = document.createElement('li');
        li.textContent = rec;
        recs.appendChild(li);
      }

      for (const field of FIELDS) {
        const visible = info && info.fields.includes(field);
        document.querySelector('[data-field="' + field + '"]').classList.toggle('hidden', !visible);
      }
    }

    function renderState(state) {
      current = state.level;
      renderLevels();

      const generating = state.status === 'generating';
      document.getElementById('generate').disabled = generating;
      document.getElementById('generate').textContent = generating ? 'Generating...' : 'Generate Prompt';

      const advisory = document.getElementById('advisory');
      advisory.textContent = state.advisory || '';
      advisory.classList.toggle('hidden', !state.advisory);

      const result = document.getElementById('result');
      if (state.generated) {
        document.getElementById('prompt').textContent = state.generated.prompt;
        document.getElementById('badge').textContent = state.generated.level + ' level prompt';
        result.classList.remove('hidden');
      } else {
        result.classList.add('hidden');
      }
    }

    async function selectLevel(level) {
      try {
        renderState(await api('/api/level', {
          method: 'POST',
          headers: { 'Content-Type': 'application/json' },
          body: JSON.stringify({ level })
        }));
      } catch (e) {
        alert(e.message);
      }
    }

    document.getElementById('form').onsubmit = async (event) => {
      event.preventDefault();
      const input = {};
      for (const field of FIELDS) {
        const el = document.getElementById(field);
        const visible = !el.closest('[data-field]').classList.contains('hidden');
        input[field] = visible ? el.value : '';
      }
      renderState({ level: current, status: 'generating' });
      try {
        renderState(await api('/api/generate', {
          method: 'POST',
          headers: { 'Content-Type': 'application/json' },
          body: JSON.stringify({ input })
        }));
      } catch (e) {
        renderState(await api('/api/state'));
        alert(e.message);
      }
    };

    document.getElementById('copy').onclick = () => {
      navigator.clipboard.writeText(document.getElementById('prompt').textContent);
    };

    document.getElementById('download').onclick = () => {
      window.location.href = '/api/export';
    };

    document.getElementById('save').onclick = async () => {
      try {
        const saved = await api('/api/export', { method: 'POST' });
        alert('Saved to ' + saved.path);
      } catch (e) {
        alert(e.message);
      }
    };

    (async () => {
      levels = await api('/api/levels');
      renderState(await api('/api/state'));
    })();
  </script>
</body>
</html>
"#;
