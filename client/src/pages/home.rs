//! Public landing page.

use leptos::prelude::*;
use leptos_router::components::A;

const FEATURES: [(&str, &str); 6] = [
    ("Instant Analysis", "Get results in seconds using advanced AI"),
    ("High Accuracy", "Trained on thousands of dermatology cases"),
    ("Detailed Reports", "Severity levels, description & education"),
    ("Privacy First", "Your data is always encrypted"),
    ("Mobile Ready", "Works on all devices"),
    ("Educational", "Learn about different skin conditions"),
];

const STEPS: [(&str, &str); 3] = [
    ("Upload Image", "Upload a clear photo of the affected area"),
    ("AI Analysis", "The AI model evaluates your image"),
    ("Get Results", "Receive an instant & educational report"),
];

#[component]
pub fn HomePage() -> impl IntoView {
    let features = FEATURES
        .into_iter()
        .map(|(title, desc)| {
            view! {
                <div class="feature-card">
                    <div class="feature-icon"></div>
                    <h3>{title}</h3>
                    <p>{desc}</p>
                </div>
            }
        })
        .collect_view();

    let steps = STEPS
        .into_iter()
        .enumerate()
        .map(|(index, (title, desc))| {
            view! {
                <div class="step">
                    <div class="step-number">{index + 1}</div>
                    <h3>{title}</h3>
                    <p>{desc}</p>
                </div>
            }
        })
        .collect_view();

    view! {
        <div class="home-wrapper">
            <header class="header">
                <div class="header-inner">
                    <div class="logo">"Derm" <span>"AI"</span></div>
                    <nav class="nav">
                        <a href="#features">"Features"</a>
                        <a href="#how-it-works">"How It Works"</a>
                    </nav>
                    <A href="/login" attr:class="btn-outline">"Sign In"</A>
                </div>
            </header>

            <section class="hero">
                <div class="hero-text">
                    <h1>"AI-Powered Skin Analysis"</h1>
                    <p>
                        "Upload an image of your skin condition and receive an instant, educational, and \
                         AI-driven analysis to help you understand your skin better."
                    </p>
                    <div class="hero-actions">
                        <A href="/login" attr:class="btn-primary">"Get Started"</A>
                        <a href="#how-it-works" class="btn-secondary">"Learn More"</a>
                    </div>
                </div>
                <div class="hero-visual">
                    <div class="hero-image-placeholder">"Skin Analysis Preview"</div>
                </div>
            </section>

            <section id="features" class="features">
                <h2 class="section-title">"Features"</h2>
                <p class="section-subtitle">"Smart, fast, and reliable skin analysis tools"</p>
                <div class="features-grid">{features}</div>
            </section>

            <section id="how-it-works" class="process">
                <h2 class="section-title">"How It Works"</h2>
                <p class="section-subtitle">"Simple 3-step flow"</p>
                <div class="process-steps">{steps}</div>
            </section>

            <section class="cta">
                <h2>"Ready to check your skin?"</h2>
                <p>"Understand your skin better with an educational AI analysis."</p>
                <A href="/login" attr:class="btn-primary btn-large">"Get Started Now"</A>
            </section>

            <footer class="footer">
                <div class="footer-grid">
                    <div>
                        <h4>"Derm-AI"</h4>
                        <p>"AI-powered skin analysis"</p>
                    </div>
                    <div>
                        <h4>"Quick Links"</h4>
                        <ul>
                            <li><a href="#features">"Features"</a></li>
                            <li><a href="#how-it-works">"How It Works"</a></li>
                        </ul>
                    </div>
                </div>
                <div class="footer-bottom">
                    "Educational use only. DermAI does not provide medical diagnoses."
                </div>
            </footer>
        </div>
    }
}
