use std::{sync::Arc, time::Duration};

use catalog::Catalog;
use dashboard_core::{
    navigation::SIDEBAR, DashboardOverview, MediaBlob, MockAuthProvider, ReleaseBrowser,
    RevenueBrowser, Route, Session, Shell, SidebarItem, StatusFilter, UploadSimulation,
    WizardController, WizardState,
};
use shared::domain::{Genre, PlatformId, ReleaseStatus};

#[tokio::test(start_paused = true)]
async fn artist_signs_in_and_uploads_a_single() {
    let mut session = Session::new(Arc::new(MockAuthProvider));
    let mut shell = Shell::default();
    assert_eq!(shell.navigate(Route::Upload, &session), Route::Login);

    session
        .sign_in("nova@example.com", "pw")
        .await
        .expect("sign in");
    assert_eq!(shell.navigate(Route::Upload, &session), Route::Upload);

    let mut wizard = WizardController::new(UploadSimulation::default());
    wizard
        .edit(|draft| {
            assert!(draft.drop_cover(MediaBlob::new("art.png", vec![1, 2, 3])));
            assert!(draft.drop_audio(MediaBlob::new("track.mp3", vec![0; 2048])));
        })
        .expect("media");
    wizard.advance().expect("metadata");
    wizard
        .edit(|draft| {
            draft.title = "Electric Dreams".into();
            draft.artist = "Nova".into();
            draft.genre = Some(Genre::Electronic);
            draft.toggle_platform(PlatformId::Tidal);
        })
        .expect("metadata");
    wizard.advance().expect("distribution");
    wizard
        .edit(|draft| draft.agreement_accepted = true)
        .expect("agreement");

    let started = tokio::time::Instant::now();
    wizard.submit().expect("submit");
    assert_eq!(wizard.run_upload().await, WizardState::Complete);
    assert_eq!(started.elapsed(), Duration::from_millis(4_500));
    assert_eq!(wizard.progress(), 100);
    assert_eq!(wizard.draft().selected_platforms().count(), 5);

    let landed = shell
        .activate(SidebarItem::Logout, &mut session)
        .await
        .expect("logout");
    assert_eq!(landed, Route::Login);
}

#[test]
fn pages_render_from_the_same_catalog() {
    let catalog = Catalog::fixture();

    let overview = DashboardOverview::build(&catalog, None);
    assert_eq!(overview.upcoming_releases.len(), 3);

    let mut releases = ReleaseBrowser::new(catalog.releases().to_vec());
    releases.set_filter(StatusFilter::Only(ReleaseStatus::Live));
    assert_eq!(releases.rows().len(), 2);

    let revenue = RevenueBrowser::new(catalog.revenue().to_vec());
    let report = revenue.report();
    let row_sum: rust_decimal::Decimal = revenue.rows().iter().map(|row| row.total()).sum();
    assert_eq!(report.grand_total, row_sum);

    assert_eq!(SIDEBAR.len(), 7);
}

#[test]
fn overview_serializes_for_json_front_ends() {
    let overview = DashboardOverview::build(&Catalog::fixture(), None);
    let json = serde_json::to_value(&overview).expect("json");
    assert_eq!(json["upcoming_releases"][1]["badge"], "Ready");
    assert_eq!(json["upcoming_releases"][1]["tone"], "info");
    assert_eq!(json["recent_releases"][0]["streams"], "12,540");
}
