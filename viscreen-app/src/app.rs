use std::time::Duration;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use viscreen_core::{
    Candidate, Eye, LetterStimulus, Phase, PlateStimulus, Response, Severity, Verdict,
};
use viscreen_locale::{label, Language};
use viscreen_session::{AcuityPlan, PlatePlan, ScreeningPlan, SessionConfig, SessionEngine};
use viscreen_timing::MonotonicClock;

use crate::input::{Input, InputReader};
use crate::{Args, TestKind};

/// How the terminal front-end draws a stimulus. The engine never sees this.
trait DisplayStimulus {
    fn render(&self, dark: bool) -> String;
    fn prompt_key(&self) -> &'static str;
}

impl DisplayStimulus for LetterStimulus {
    fn render(&self, dark: bool) -> String {
        // Rough terminal stand-in for point size: padding shrinks with the
        // staircase.
        let pad = " ".repeat((self.point_size / 12.0).round() as usize);
        let body = format!("{pad}{}{pad}", self.letter);
        if dark {
            format!("\x1b[1;97;40m{body}\x1b[0m  ({:.0} pt)", self.point_size)
        } else {
            format!("{body}  ({:.0} pt)", self.point_size)
        }
    }

    fn prompt_key(&self) -> &'static str {
        "readLetter"
    }
}

impl DisplayStimulus for PlateStimulus {
    fn render(&self, dark: bool) -> String {
        let swatches: String = self
            .palette
            .iter()
            .map(|hex| color_block(hex, dark))
            .collect();
        format!(
            "Plate {} : {} dots in {} hiding a figure in {}",
            self.id,
            self.dot_count,
            swatches,
            color_block(self.figure_color, dark)
        )
    }

    fn prompt_key(&self) -> &'static str {
        "selectNumber"
    }
}

fn color_block(hex: &str, ansi: bool) -> String {
    match (ansi, hex_rgb(hex)) {
        (true, Some((r, g, b))) => format!("\x1b[48;2;{r};{g};{b}m  \x1b[0m"),
        _ => format!(" {hex} "),
    }
}

fn hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

#[derive(Serialize)]
struct Report<'a> {
    verdict: &'a Verdict,
    responses: &'a [Response],
}

pub struct App {
    kind: TestKind,
    lang: Language,
    seed: Option<u64>,
    dark: bool,
    json: bool,
    input: InputReader,
}

impl App {
    pub fn new(args: Args) -> Result<Self> {
        let lang = Language::from_code(&args.lang)
            .ok_or_else(|| anyhow::anyhow!("unsupported language `{}`", args.lang))?;
        Ok(Self {
            kind: args.test,
            lang,
            seed: args.seed,
            dark: args.dark,
            json: args.json,
            input: InputReader::spawn(),
        })
    }

    pub fn run(self) -> Result<()> {
        println!("{}", self.t("welcome"));
        println!("{}\n", self.t("subtitle"));
        match self.kind {
            TestKind::Acuity => self.run_session(AcuityPlan),
            TestKind::Plates => self.run_session(PlatePlan),
        }
    }

    fn t<'a>(&self, key: &'a str) -> &'a str {
        label(self.lang, key)
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    fn run_session<P>(&self, plan: P) -> Result<()>
    where
        P: ScreeningPlan,
        P::Stim: DisplayStimulus,
    {
        let title_key = match plan.name() {
            "acuity" => "refractiveTest",
            _ => "colorBlindTest",
        };
        println!("== {} ==\n", self.t(title_key));

        let mut engine =
            SessionEngine::new(plan, SessionConfig::default(), MonotonicClock::new(), self.rng())?;

        loop {
            let phase = engine.phase();
            if phase.is_results() {
                self.show_verdict(&engine)?;
                if !self.ask_restart() {
                    return Ok(());
                }
                engine.reset();
            } else if phase.awaits_proceed() {
                if !self.show_instructions::<P>(phase) {
                    return Ok(());
                }
                if phase == P::Phase::default() {
                    engine.begin()?;
                } else {
                    engine.proceed()?;
                }
            } else if !self.run_trial(&mut engine)? {
                return Ok(());
            }
        }
    }

    /// Returns false when stdin is gone and the session should be abandoned
    /// (which drops the engine and with it any pending deadline).
    fn show_instructions<P: ScreeningPlan>(&self, phase: P::Phase) -> bool {
        if phase == P::Phase::default() {
            println!("{}:", self.t("instructions"));
            let key = match self.kind {
                TestKind::Acuity => "acuityInstructions",
                TestKind::Plates => "plateInstructions",
            };
            println!("  {}", self.t(key));
        } else {
            // Testing one eye means covering the other.
            let key = match phase.active_eye() {
                Some(Eye::Left) => "coverRightEye",
                Some(Eye::Right) => "coverLeftEye",
                None => "next",
            };
            println!("{}", self.t(key));
        }
        println!("[{}]", self.t("begin"));
        !matches!(self.input.wait_enter(), Input::Closed)
    }

    fn run_trial<P>(&self, engine: &mut SessionEngine<P, MonotonicClock, StdRng>) -> Result<bool>
    where
        P: ScreeningPlan,
        P::Stim: DisplayStimulus,
    {
        let Some((current, total)) = engine.trial_progress() else {
            return Ok(true);
        };
        let (rendered, prompt_key, options) = {
            let Some(trial) = engine.current_trial() else {
                return Ok(true);
            };
            (
                trial.stimulus.render(self.dark),
                trial.stimulus.prompt_key(),
                trial.options.clone(),
            )
        };

        println!("\n[{current}/{total}]  {rendered}");
        println!("{}", self.t(prompt_key));
        for (i, option) in options.iter().enumerate() {
            println!("  {}) {}", i + 1, self.display_value(option));
        }

        loop {
            let remaining = engine.deadline_remaining().unwrap_or(Duration::ZERO);
            match self.input.read_line(remaining) {
                Input::Line(line) => match parse_choice(&line, &options) {
                    Some(value) => {
                        engine.submit_answer(&value)?;
                        return Ok(true);
                    }
                    // Submit stays unavailable until a valid selection.
                    None => println!("1-{}?", options.len()),
                },
                Input::TimedOut => {
                    if engine.poll_deadline() {
                        println!("{}", self.t("timedOut"));
                        return Ok(true);
                    }
                }
                Input::Closed => {
                    std::thread::sleep(remaining);
                    if engine.poll_deadline() {
                        return Ok(true);
                    }
                    return Ok(false);
                }
            }
        }
    }

    fn display_value(&self, option: &Candidate) -> String {
        if option.is_escape() {
            self.t(&option.value).to_string()
        } else {
            option.value.clone()
        }
    }

    fn show_verdict<P>(&self, engine: &SessionEngine<P, MonotonicClock, StdRng>) -> Result<()>
    where
        P: ScreeningPlan,
    {
        let verdict = engine.verdict()?;
        println!("\n=== {} ===", self.t("results"));
        match &verdict {
            Verdict::Acuity { left, right } => {
                println!("{}: {}/{}", self.t("leftEye"), left.correct, left.total);
                println!("{}: {}/{}", self.t("rightEye"), right.correct, right.total);
                if verdict.is_perfect() {
                    println!("{}", self.t("normal"));
                } else {
                    println!("{}", self.t("visitDoctor"));
                }
            }
            Verdict::Plates {
                severity,
                correct,
                total,
            } => {
                println!("{correct}/{total}");
                let key = match severity {
                    Severity::Normal => "colorBlindNormal",
                    Severity::Mild => "colorBlindMild",
                    Severity::Significant => "colorBlindSignificant",
                };
                println!("{}", self.t(key));
                if *severity != Severity::Normal {
                    println!("{}", self.t("visitDoctor"));
                }
            }
        }

        if self.json {
            let report = Report {
                verdict: &verdict,
                responses: engine.responses(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Ok(())
    }

    fn ask_restart(&self) -> bool {
        println!("\n{}? [y/N]", self.t("restart"));
        matches!(
            self.input.wait_enter(),
            Input::Line(line) if line.trim().eq_ignore_ascii_case("y")
        )
    }
}

/// A selection is the 1-based index of an option; anything else is refused.
fn parse_choice(line: &str, options: &[Candidate]) -> Option<String> {
    let picked: usize = line.trim().parse().ok()?;
    options
        .get(picked.checked_sub(1)?)
        .map(|o| o.value.clone())
}
