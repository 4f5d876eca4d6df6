//! Generate a poem from the command line. The flags mirror the fields of the
//! poetry form: theme, emotion, style, form, length, temperature, model and
//! provider.

// Note: This example uses blocking calls for simplicity such as `print` and
// `stdin().lock()`. In a real application, these should usually be replaced
// with async alternatives.

use clap::Parser;
use std::{
    io::{stdin, BufRead},
    path::PathBuf,
};
use versewright::{
    prompt::{Form, Length, Style, Temperature},
    session::FormInput,
    GenerationRequest, Model, Provider, Session,
};

/// Write a poem with a Hugging Face hosted model.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Central subject of the poem, e.g. "autumn forest at dusk".
    #[arg(short, long, default_value = "")]
    theme: String,
    /// Emotional tone, e.g. "nostalgia".
    #[arg(short, long, default_value = "")]
    emotion: String,
    /// Poetic style, e.g. "Romantic" or "Gothic".
    #[arg(short, long, default_value = "Romantic", value_parser = parse_style)]
    style: Style,
    /// Poetic form, e.g. "Haiku" or "Free Verse".
    #[arg(short, long, default_value = "Free Verse", value_parser = parse_form)]
    form: Form,
    /// short, medium or long.
    #[arg(short, long, default_value = "medium", value_parser = parse_length)]
    length: Length,
    /// Between 0.1 and 1.0. Higher is more surprising.
    #[arg(long, default_value_t = 0.8)]
    temperature: f32,
    /// Model label, e.g. "Qwen2.5-7B-Instruct", or any repository id.
    #[arg(short, long, default_value = "Mistral-7B-Instruct-v0.3")]
    model: String,
    /// auto or hf-inference.
    #[arg(long, default_value = "hf-inference", value_parser = parse_provider)]
    provider: Provider,
    /// Save the poem as `<title>.txt` in `--out`.
    #[arg(long)]
    title: Option<String>,
    /// Directory to save the poem in.
    #[arg(long, default_value = ".")]
    out: PathBuf,
    /// Print the poem as Markdown with its metadata.
    #[arg(long, conflicts_with = "html")]
    markdown: bool,
    /// Print the poem as a standalone HTML page with its metadata.
    #[arg(long)]
    html: bool,
}

fn parse_style(s: &str) -> Result<Style, String> {
    Style::from_label(s).ok_or_else(|| {
        format!("expected one of: {}", join(Style::ALL.iter()))
    })
}

fn parse_form(s: &str) -> Result<Form, String> {
    Form::from_label(s)
        .ok_or_else(|| format!("expected one of: {}", join(Form::ALL.iter())))
}

fn parse_length(s: &str) -> Result<Length, String> {
    Length::from_label(s).ok_or_else(|| {
        format!("expected one of: {}", join(Length::ALL.iter()))
    })
}

fn parse_provider(s: &str) -> Result<Provider, String> {
    Provider::ALL
        .into_iter()
        .find(|p| p.to_string() == s)
        .ok_or_else(|| {
            format!("expected one of: {}", join(Provider::ALL.iter()))
        })
}

fn join<T: std::fmt::Display>(items: impl Iterator<Item = T>) -> String {
    items.map(|i| i.to_string()).collect::<Vec<_>>().join(", ")
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Read the command line arguments.
    let args = Args::parse();

    let model = Model::from_label(&args.model)
        .unwrap_or_else(|| Model::from(args.model.clone()));

    let request = GenerationRequest::default()
        .theme(args.theme)
        .emotion(args.emotion)
        .style(args.style)
        .form(args.form)
        .length(args.length)
        .temperature(Temperature::try_from(args.temperature)?)
        .model(model)
        .provider(args.provider);

    // Get the token from stdin.
    println!("Enter your Hugging Face API token:");
    let credential = stdin().lock().lines().next().transpose()?.unwrap_or_default();

    println!(
        "Crafting your {} {} poem with {}...\n",
        request.length, request.form, request.model
    );

    let mut session = Session::new();
    let result = match session
        .submit(FormInput {
            request,
            credential,
        })
        .await
    {
        Ok(result) => result,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("Try adjusting your parameters or checking your API key.");
            std::process::exit(1);
        }
    };

    if args.markdown {
        #[cfg(feature = "markdown")]
        {
            use versewright::markdown::ToMarkdown;
            println!("{}", result.markdown());
        }
        #[cfg(not(feature = "markdown"))]
        {
            eprintln!("Built without the `markdown` feature.");
            println!("{result}");
        }
    } else if args.html {
        #[cfg(feature = "html")]
        {
            use versewright::html::ToHtml;
            println!("{}", result.html_page());
        }
        #[cfg(not(feature = "html"))]
        {
            eprintln!("Built without the `html` feature.");
            println!("{result}");
        }
    } else {
        println!("{result}");
    }

    if let Some(title) = args.title {
        let path = session.export_to(&title, &args.out)?;
        println!("\nSaved to {}", path.display());
    }

    Ok(())
}
