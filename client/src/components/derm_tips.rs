//! Dermatology tips list with single-expand cards.

#[cfg(test)]
#[path = "derm_tips_test.rs"]
mod derm_tips_test;

use leptos::prelude::*;

use crate::state::ui::UiState;

/// One static tip card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DermTip {
    pub title: &'static str,
    pub category: &'static str,
    pub description: &'static str,
}

pub const TIPS: [DermTip; 6] = [
    DermTip {
        title: "Sun Protection is Essential",
        category: "Prevention",
        description: "Daily SPF 30+ protects against UV damage. Reapply every 2 hours when outdoors.",
    },
    DermTip {
        title: "Moisturize Consistently",
        category: "Care",
        description: "Use a non-comedogenic moisturizer twice daily to maintain skin barrier health.",
    },
    DermTip {
        title: "Avoid Picking Lesions",
        category: "Safety",
        description: "Scratching or picking can lead to infection and scarring. Let lesions heal naturally.",
    },
    DermTip {
        title: "Stay Hydrated",
        category: "Wellness",
        description: "Drink 8-10 glasses of water daily for optimal skin health from within.",
    },
    DermTip {
        title: "Regular Check-ups",
        category: "Medical",
        description: "Visit a dermatologist annually for skin cancer screening and preventive care.",
    },
    DermTip {
        title: "Clean Brushes & Tools",
        category: "Hygiene",
        description: "Sanitize makeup brushes weekly to prevent bacterial buildup and infections.",
    },
];

/// Tips panel; clicking a card toggles it and collapses any other.
#[component]
pub fn DermTips() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();

    let cards = TIPS
        .into_iter()
        .enumerate()
        .map(|(index, tip)| {
            let expanded = move || ui.get().is_tip_expanded(index);
            view! {
                <div class="tip-card" class:expanded=expanded>
                    <button class="tip-button" on:click=move |_| ui.update(|u| u.toggle_tip(index))>
                        <div class="tip-text">
                            <h4>{tip.title}</h4>
                            <span class="tip-category">{tip.category}</span>
                        </div>
                        <span class="chevron">"\u{25BE}"</span>
                    </button>
                    <Show when=expanded>
                        <div class="tip-content">
                            <p>{tip.description}</p>
                        </div>
                    </Show>
                </div>
            }
        })
        .collect_view();

    view! {
        <div class="derm-tips">
            <div class="tips-header">
                <h3>"Dermatology Tips"</h3>
            </div>
            <div class="tips-list">{cards}</div>
        </div>
    }
}
