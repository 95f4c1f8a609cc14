use core_logic::Account;

fn tokens(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("token-{}", i)).collect()
}

#[test]
fn test_round_robin_assignment() {
    let proxies = vec![
        "http://p0:8080".to_string(),
        "socks5://p1:1080".to_string(),
    ];

    let accounts = Account::pair(tokens(5), &proxies);

    assert_eq!(accounts.len(), 5);
    for account in &accounts {
        let expected = &proxies[account.index % proxies.len()];
        assert_eq!(account.proxy.as_ref(), Some(expected));
    }
}

#[test]
fn test_no_proxies_means_unproxied_accounts() {
    let accounts = Account::pair(tokens(3), &[]);

    assert_eq!(accounts.len(), 3);
    assert!(accounts.iter().all(|a| a.proxy.is_none()));
}

#[test]
fn test_single_proxy_covers_every_account() {
    let proxies = vec!["http://only:8080".to_string()];
    let accounts = Account::pair(tokens(4), &proxies);

    assert!(accounts
        .iter()
        .all(|a| a.proxy.as_deref() == Some("http://only:8080")));
}

#[test]
fn test_identity_is_position_in_token_list() {
    let accounts = Account::pair(tokens(3), &[]);

    for (i, account) in accounts.iter().enumerate() {
        assert_eq!(account.index, i);
        assert_eq!(account.token, format!("token-{}", i));
        assert_eq!(account.id(), i + 1);
    }
}

#[test]
fn test_debug_redacts_token() {
    let accounts = Account::pair(vec!["super-secret-bearer".to_string()], &[]);
    let rendered = format!("{:?}", accounts[0]);

    assert!(!rendered.contains("super-secret-bearer"));
    assert!(rendered.contains("REDACTED"));
}
